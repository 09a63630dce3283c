pub mod setup;

use skolero_domain::PushSubscription;
use skolero_infra::IPushSender;
use std::sync::{Arc, Mutex};

/// Push sender that records delivered endpoints instead of making
/// network calls
pub struct RecordingPushSender {
    pub delivered: Arc<Mutex<Vec<String>>>,
}

impl RecordingPushSender {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                delivered: delivered.clone(),
            },
            delivered,
        )
    }
}

#[async_trait::async_trait]
impl IPushSender for RecordingPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        _payload: &serde_json::Value,
    ) -> anyhow::Result<()> {
        self.delivered
            .lock()
            .unwrap()
            .push(subscription.endpoint.clone());
        Ok(())
    }
}
