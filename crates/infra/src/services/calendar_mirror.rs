use skolero_domain::{NotificationRecord, ID};
use std::time::Duration;

/// Best-effort mirroring of the notification timeline into an external
/// calendar. The scheduling core never depends on these calls succeeding;
/// callers log and swallow every failure.
#[async_trait::async_trait]
pub trait ICalendarMirror: Send + Sync {
    async fn insert_event(&self, record: &NotificationRecord) -> anyhow::Result<()>;
    async fn delete_event(&self, record_id: &ID) -> anyhow::Result<()>;
}

/// Mirror disabled; used when no calendar url is configured.
pub struct NoopCalendarMirror {}

#[async_trait::async_trait]
impl ICalendarMirror for NoopCalendarMirror {
    async fn insert_event(&self, _record: &NotificationRecord) -> anyhow::Result<()> {
        Ok(())
    }

    async fn delete_event(&self, _record_id: &ID) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Mirrors notifications as events of an external calendar REST api.
pub struct RestCalendarMirror {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestCalendarMirror {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("To build calendar http client");
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

#[async_trait::async_trait]
impl ICalendarMirror for RestCalendarMirror {
    async fn insert_event(&self, record: &NotificationRecord) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "id": record.id.as_string(),
            "summary": record.course.name,
            "description": record.course.description,
            "start": record.fire_at,
        });
        let url = format!("{}/events", self.base_url);
        self.authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_event(&self, record_id: &ID) -> anyhow::Result<()> {
        let url = format!("{}/events/{}", self.base_url, record_id);
        self.authorize(self.client.delete(&url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
