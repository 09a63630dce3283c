mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use skolero_domain::{NotificationRecord, ID};

/// A recomputed fire time for one chain member
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationUpdate {
    pub id: ID,
    pub fire_at: i64,
}

impl NotificationUpdate {
    pub fn from_records(records: &[NotificationRecord]) -> Vec<Self> {
        records
            .iter()
            .map(|r| Self {
                id: r.id.clone(),
                fire_at: r.fire_at,
            })
            .collect()
    }
}

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Deletes the user's prior chain and inserts the new records
    async fn replace_chain(
        &self,
        email: &str,
        records: &[NotificationRecord],
    ) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<NotificationRecord>;
    /// All records for the user ordered by `fire_at` ascending
    async fn find_by_email(&self, email: &str) -> Vec<NotificationRecord>;
    /// All non paused records with `fire_at >= now` across users, used for
    /// rehydration. The boundary is inclusive: a record due exactly now is
    /// still live, matching the scheduling cutoff.
    async fn find_active_future(&self, now: i64) -> Vec<NotificationRecord>;
    /// Applies the recomputed fire times and clears the pause markers of
    /// the user's chain as one atomic write. A failure leaves the chain
    /// paused with its old fire times.
    async fn resume_chain(&self, email: &str, updates: &[NotificationUpdate])
        -> anyhow::Result<()>;
    /// Sets or clears the pause marker on every record of the user's chain
    async fn set_paused(&self, email: &str, paused_since: Option<i64>) -> anyhow::Result<()>;
    /// Deletes the record and applies the recomputed fire times of the
    /// surviving chain members as one atomic write. `Ok(None)` when the
    /// record does not exist; no update is applied in that case.
    async fn delete_and_shift(
        &self,
        notification_id: &ID,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<Option<NotificationRecord>>;
}
