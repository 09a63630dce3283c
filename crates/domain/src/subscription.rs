use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Client keys from the browser push subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionKeys {
    pub auth: String,
    pub p256dh: String,
}

/// A web-push subscription registered by one of a user's browsers. A user
/// can have several; deliveries are attempted against all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub id: ID,
    /// Email of the owning user
    pub email: String,
    pub endpoint: String,
    pub expiration_time: Option<String>,
    pub keys: SubscriptionKeys,
}

impl PushSubscription {
    pub fn new(email: &str, endpoint: &str, keys: SubscriptionKeys) -> Self {
        Self {
            id: Default::default(),
            email: email.to_string(),
            endpoint: endpoint.to_string(),
            expiration_time: None,
            keys,
        }
    }
}

impl Entity for PushSubscription {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
