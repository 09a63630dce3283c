use crate::dtos::{SubscriptionDTO, SubscriptionKeysDTO};
use serde::{Deserialize, Serialize};
use skolero_domain::PushSubscription;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub subscription: SubscriptionDTO,
}

impl SubscriptionResponse {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            subscription: SubscriptionDTO::new(subscription),
        }
    }
}

pub mod create_subscription {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub endpoint: String,
        pub expiration_time: Option<String>,
        pub keys: SubscriptionKeysDTO,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod get_subscriptions {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscriptions: Vec<SubscriptionDTO>,
    }

    impl APIResponse {
        pub fn new(subscriptions: Vec<PushSubscription>) -> Self {
            Self {
                subscriptions: subscriptions.into_iter().map(SubscriptionDTO::new).collect(),
            }
        }
    }
}
