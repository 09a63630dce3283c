use anyhow::Context;
use skolero_domain::PushSubscription;
use std::time::Duration;

/// One-way push delivery to a single subscription endpoint. Failures are
/// the caller's to log; they are never retried.
#[async_trait::async_trait]
pub trait IPushSender: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()>;
}

/// Delivers the payload to the subscription's push endpoint over HTTP.
pub struct WebPushSender {
    client: reqwest::Client,
}

impl WebPushSender {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("To build push http client");
        Self { client }
    }
}

impl Default for WebPushSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushSender for WebPushSender {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&subscription.endpoint)
            .header("TTL", "86400")
            .json(payload)
            .send()
            .await
            .with_context(|| {
                format!("Unable to reach push endpoint {}", subscription.endpoint)
            })?;

        res.error_for_status().with_context(|| {
            format!("Push endpoint {} rejected delivery", subscription.endpoint)
        })?;
        Ok(())
    }
}
