use super::{INotificationRepo, NotificationUpdate};
use crate::repos::shared::inmemory_repo::*;
use skolero_domain::{NotificationRecord, ID};
use std::sync::Mutex;

pub struct InMemoryNotificationRepo {
    notifications: Mutex<Vec<NotificationRecord>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn replace_chain(
        &self,
        email: &str,
        records: &[NotificationRecord],
    ) -> anyhow::Result<()> {
        delete_by(&self.notifications, |n: &NotificationRecord| {
            n.course.email == email
        });
        for record in records {
            insert(record, &self.notifications);
        }
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<NotificationRecord> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_email(&self, email: &str) -> Vec<NotificationRecord> {
        let mut records = find_by(&self.notifications, |n: &NotificationRecord| {
            n.course.email == email
        });
        records.sort_by_key(|n| n.fire_at);
        records
    }

    async fn find_active_future(&self, now: i64) -> Vec<NotificationRecord> {
        let mut records = find_by(&self.notifications, |n: &NotificationRecord| {
            n.paused_since.is_none() && n.fire_at >= now
        });
        records.sort_by_key(|n| n.fire_at);
        records
    }

    async fn resume_chain(
        &self,
        email: &str,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<()> {
        let mut notifications = self.notifications.lock().unwrap();
        for record in notifications.iter_mut() {
            if record.course.email == email {
                record.paused_since = None;
                if let Some(update) = updates.iter().find(|u| u.id == record.id) {
                    record.fire_at = update.fire_at;
                }
            }
        }
        Ok(())
    }

    async fn set_paused(&self, email: &str, paused_since: Option<i64>) -> anyhow::Result<()> {
        let mut notifications = self.notifications.lock().unwrap();
        for record in notifications.iter_mut() {
            if record.course.email == email {
                record.paused_since = paused_since;
            }
        }
        Ok(())
    }

    async fn delete_and_shift(
        &self,
        notification_id: &ID,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<Option<NotificationRecord>> {
        let mut notifications = self.notifications.lock().unwrap();
        let pos = match notifications.iter().position(|n| n.id == *notification_id) {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let deleted = notifications.remove(pos);
        for record in notifications.iter_mut() {
            if let Some(update) = updates.iter().find(|u| u.id == record.id) {
                record.fire_at = update.fire_at;
            }
        }
        Ok(Some(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skolero_domain::CourseSnapshot;

    fn record(fire_at: i64) -> NotificationRecord {
        NotificationRecord::new(
            CourseSnapshot {
                email: "student@skolero.test".into(),
                name: "Linear Algebra".into(),
                description: None,
            },
            fire_at,
            30,
        )
    }

    #[tokio::test]
    async fn active_future_includes_records_due_exactly_now() {
        let repo = InMemoryNotificationRepo::new();
        repo.replace_chain(
            "student@skolero.test",
            &[record(999), record(1000), record(1001)],
        )
        .await
        .unwrap();

        let live = repo.find_active_future(1000).await;
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].fire_at, 1000);
        assert_eq!(live[1].fire_at, 1001);
    }
}
