use super::{INotificationRepo, NotificationUpdate};
use skolero_domain::{CourseSnapshot, NotificationRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    email: String,
    course_name: String,
    course_description: Option<String>,
    fire_at: i64,
    duration_before_next: i64,
    paused_since: Option<i64>,
}

impl From<NotificationRaw> for NotificationRecord {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            course: CourseSnapshot {
                email: raw.email,
                name: raw.course_name,
                description: raw.course_description,
            },
            fire_at: raw.fire_at,
            duration_before_next: raw.duration_before_next,
            paused_since: raw.paused_since,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn replace_chain(
        &self,
        email: &str,
        records: &[NotificationRecord],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(&mut *tx)
        .await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO notifications
                (notification_uid, email, course_name, course_description, fire_at, duration_before_next, paused_since)
                VALUES($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(record.id.inner_ref())
            .bind(&record.course.email)
            .bind(&record.course.name)
            .bind(&record.course.description)
            .bind(record.fire_at)
            .bind(record.duration_before_next)
            .bind(record.paused_since)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<NotificationRecord> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|raw| raw.into())
    }

    async fn find_by_email(&self, email: &str) -> Vec<NotificationRecord> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications
            WHERE email = $1
            ORDER BY fire_at ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }

    async fn find_active_future(&self, now: i64) -> Vec<NotificationRecord> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications
            WHERE paused_since IS NULL AND fire_at >= $1
            ORDER BY fire_at ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }

    async fn resume_chain(
        &self,
        email: &str,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for update in updates {
            sqlx::query(
                r#"
                UPDATE notifications
                SET fire_at = $2
                WHERE notification_uid = $1
                "#,
            )
            .bind(update.id.inner_ref())
            .bind(update.fire_at)
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query(
            r#"
            UPDATE notifications
            SET paused_since = NULL
            WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn set_paused(&self, email: &str, paused_since: Option<i64>) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET paused_since = $2
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(paused_since)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_and_shift(
        &self,
        notification_id: &ID,
        updates: &[NotificationUpdate],
    ) -> anyhow::Result<Option<NotificationRecord>> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query_as::<_, NotificationRaw>(
            r#"
            DELETE FROM notifications
            WHERE notification_uid = $1
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;

        let deleted = match deleted {
            Some(raw) => raw,
            // Dropping the transaction rolls it back
            None => return Ok(None),
        };

        for update in updates {
            sqlx::query(
                r#"
                UPDATE notifications
                SET fire_at = $2
                WHERE notification_uid = $1
                "#,
            )
            .bind(update.id.inner_ref())
            .bind(update.fire_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(Some(deleted.into()))
    }
}
