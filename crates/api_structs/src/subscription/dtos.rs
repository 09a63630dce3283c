use serde::{Deserialize, Serialize};
use skolero_domain::{PushSubscription, SubscriptionKeys, ID};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionKeysDTO {
    pub auth: String,
    pub p256dh: String,
}

impl From<SubscriptionKeysDTO> for SubscriptionKeys {
    fn from(dto: SubscriptionKeysDTO) -> Self {
        Self {
            auth: dto.auth,
            p256dh: dto.p256dh,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDTO {
    pub id: ID,
    pub email: String,
    pub endpoint: String,
    pub expiration_time: Option<String>,
    pub keys: SubscriptionKeysDTO,
}

impl SubscriptionDTO {
    pub fn new(subscription: PushSubscription) -> Self {
        Self {
            id: subscription.id,
            email: subscription.email,
            endpoint: subscription.endpoint,
            expiration_time: subscription.expiration_time,
            keys: SubscriptionKeysDTO {
                auth: subscription.keys.auth,
                p256dh: subscription.keys.p256dh,
            },
        }
    }
}
