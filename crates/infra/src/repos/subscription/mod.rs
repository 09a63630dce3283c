mod inmemory;
mod postgres;

pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;
use skolero_domain::PushSubscription;

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()>;
    async fn find_by_email(&self, email: &str) -> Vec<PushSubscription>;
    /// Whether the user already registered this endpoint
    async fn exists(&self, email: &str, endpoint: &str) -> bool;
}
