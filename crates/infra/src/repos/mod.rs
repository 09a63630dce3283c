mod course;
mod notification;
mod shared;
mod subscription;

pub use course::ICourseRepo;
use course::{InMemoryCourseRepo, PostgresCourseRepo};
pub use notification::{INotificationRepo, NotificationUpdate};
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use sqlx::PgPool;
use std::sync::Arc;
pub use subscription::ISubscriptionRepo;
use subscription::{InMemorySubscriptionRepo, PostgresSubscriptionRepo};

#[derive(Clone)]
pub struct Repos {
    pub notifications: Arc<dyn INotificationRepo>,
    pub courses: Arc<dyn ICourseRepo>,
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            courses: Arc::new(PostgresCourseRepo::new(pool.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            courses: Arc::new(InMemoryCourseRepo::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
        }
    }
}
