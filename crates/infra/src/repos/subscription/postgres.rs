use super::ISubscriptionRepo;
use skolero_domain::{PushSubscription, SubscriptionKeys};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    email: String,
    endpoint: String,
    expiration_time: Option<String>,
    auth_key: String,
    p256dh_key: String,
}

impl From<SubscriptionRaw> for PushSubscription {
    fn from(raw: SubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            email: raw.email,
            endpoint: raw.endpoint,
            expiration_time: raw.expiration_time,
            keys: SubscriptionKeys {
                auth: raw.auth_key,
                p256dh: raw.p256dh_key,
            },
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &PushSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions
            (subscription_uid, email, endpoint, expiration_time, auth_key, p256dh_key)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(&subscription.email)
        .bind(&subscription.endpoint)
        .bind(&subscription.expiration_time)
        .bind(&subscription.keys.auth)
        .bind(&subscription.keys.p256dh)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Vec<PushSubscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions
            WHERE email = $1
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

    async fn exists(&self, email: &str, endpoint: &str) -> bool {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions
            WHERE email = $1 AND endpoint = $2
            "#,
        )
        .bind(email)
        .bind(endpoint)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .is_some()
    }
}
