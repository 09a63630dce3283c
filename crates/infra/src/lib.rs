mod config;
mod repos;
mod services;
mod system;
mod timers;
mod token_cache;

pub use config::Config;
pub use repos::{
    ICourseRepo, INotificationRepo, ISubscriptionRepo, NotificationUpdate, Repos,
};
pub use services::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
pub use timers::TimerRegistry;
pub use token_cache::TokenCache;
use tracing::info;

#[derive(Clone)]
pub struct SkoleroContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub timers: TimerRegistry,
    pub push_sender: Arc<dyn IPushSender>,
    pub calendar_mirror: Arc<dyn ICalendarMirror>,
    pub token_cache: TokenCache,
}

impl SkoleroContext {
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let calendar_mirror = create_calendar_mirror(&config);
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            timers: TimerRegistry::new(),
            push_sender: Arc::new(WebPushSender::new()),
            calendar_mirror,
            token_cache: TokenCache::new(),
        }
    }

    async fn create_postgres(connection_string: &str) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Database migrations to succeed");

        let config = Config::new();
        let calendar_mirror = create_calendar_mirror(&config);
        Self {
            repos: Repos::create_postgres(pool),
            config,
            sys: Arc::new(RealSys {}),
            timers: TimerRegistry::new(),
            push_sender: Arc::new(WebPushSender::new()),
            calendar_mirror,
            token_cache: TokenCache::new(),
        }
    }
}

fn create_calendar_mirror(config: &Config) -> Arc<dyn ICalendarMirror> {
    match &config.calendar_mirror_url {
        Some(url) => Arc::new(RestCalendarMirror::new(
            url.clone(),
            config.calendar_mirror_api_key.clone(),
        )),
        None => Arc::new(NoopCalendarMirror {}),
    }
}

/// Will setup the infrastructure context given the environment. Uses
/// postgres when `DATABASE_URL` is set and falls back to inmemory repos
/// otherwise.
pub async fn setup_context() -> SkoleroContext {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            info!("{} env var was provided. Going to use postgres.", PSQL_CONNECTION_STRING);
            SkoleroContext::create_postgres(&connection_string).await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            SkoleroContext::create_inmemory()
        }
    }
}
