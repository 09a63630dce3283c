use skolero_domain::{CourseSnapshot, NotificationRecord, PushSubscription, SubscriptionKeys, ID};
use skolero_infra::{INotificationRepo, IPushSender, ISys, NotificationUpdate, SkoleroContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const EMAIL: &str = "student@skolero.test";

/// Frozen clock
pub struct StaticSys(pub i64);

impl ISys for StaticSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Push sender that records delivered endpoints and fails for the
/// configured ones
pub struct RecordingPushSender {
    pub delivered: Arc<Mutex<Vec<String>>>,
    pub failing_endpoints: Vec<String>,
}

impl RecordingPushSender {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                delivered: delivered.clone(),
                failing_endpoints: Vec::new(),
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
        if self.failing_endpoints.contains(&subscription.endpoint) {
            anyhow::bail!("Push endpoint {} has expired", subscription.endpoint);
        }
        self.delivered
            .lock()
            .unwrap()
            .push(subscription.endpoint.clone());
        Ok(())
    }
}

/// Notification repo wrapper whose next chain write fails, for exercising
/// persistence failure paths
pub struct FlakyNotificationRepo {
    inner: Arc<dyn INotificationRepo>,
    fail_next: AtomicBool,
}

impl FlakyNotificationRepo {
    /// Wraps the context's notification repo and returns a handle used to
    /// arm the failure
    pub fn install(ctx: &mut SkoleroContext) -> Arc<FlakyNotificationRepo> {
        let repo = Arc::new(FlakyNotificationRepo {
            inner: ctx.repos.notifications.clone(),
            fail_next: AtomicBool::new(false),
        });
        ctx.repos.notifications = repo.clone();
        repo
    }

    pub fn fail_next_write(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn should_fail(&self) -> bool {
        self.fail_next.swap(false, Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl INotificationRepo for FlakyNotificationRepo {
    async fn replace_chain(
        &self,
        email: &str,
        records: &[NotificationRecord],
    ) -> anyhow::Result<()> {
        self.inner.replace_chain(email, records).await
    }

    async fn find(&self, notification_id: &ID) -> Option<NotificationRecord> {
        self.inner.find(notification_id).await
    }

    async fn find_by_email(&self, email: &str) -> Vec<NotificationRecord> {
        self.inner.find_by_email(email).await
    }

    async fn find_active_future(&self, now: i64) -> Vec<NotificationRecord> {
        self.inner.find_active_future(now).await
    }

    async fn resume_chain(
        &self,
        email: &str,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<()> {
        if self.should_fail() {
            anyhow::bail!("Lost connection to the store");
        }
        self.inner.resume_chain(email, updates).await
    }

    async fn set_paused(&self, email: &str, paused_since: Option<i64>) -> anyhow::Result<()> {
        if self.should_fail() {
            anyhow::bail!("Lost connection to the store");
        }
        self.inner.set_paused(email, paused_since).await
    }

    async fn delete_and_shift(
        &self,
        notification_id: &ID,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<Option<NotificationRecord>> {
        if self.should_fail() {
            anyhow::bail!("Lost connection to the store");
        }
        self.inner.delete_and_shift(notification_id, updates).await
    }
}

/// Inmemory context with a frozen clock
pub fn setup_ctx_at(now: i64) -> SkoleroContext {
    let mut ctx = SkoleroContext::create_inmemory();
    ctx.sys = Arc::new(StaticSys(now));
    ctx
}

pub fn snapshot() -> CourseSnapshot {
    CourseSnapshot {
        email: EMAIL.into(),
        name: "Linear Algebra".into(),
        description: Some("Eigenvalues".into()),
    }
}

pub fn record_at(fire_at: i64, duration_before_next: i64) -> NotificationRecord {
    NotificationRecord::new(snapshot(), fire_at, duration_before_next)
}

pub fn subscription(email: &str, endpoint: &str) -> PushSubscription {
    PushSubscription::new(
        email,
        endpoint,
        SubscriptionKeys {
            auth: "auth-key".into(),
            p256dh: "p256dh-key".into(),
        },
    )
}
