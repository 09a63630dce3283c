use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::clock::resolve_now;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::pause_notifications::{APIResponse, RequestBody};
use skolero_domain::NotificationRecord;
use skolero_infra::SkoleroContext;

pub async fn pause_notifications_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = PauseNotificationsUseCase {
        email: identity.email,
        now: body.0.now,
    };

    execute(usecase, &ctx)
        .await
        .map(|records| HttpResponse::Ok().json(APIResponse::new(records)))
        .map_err(|e| match e {
            UseCaseError::NoChain => {
                ApiError::NotFound("You have no notification chain to pause".into())
            }
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// Freezes the caller's chain: every record is stamped with the pause
/// instant and all live timers are cancelled. Pausing a chain that is
/// already paused is a no-op, the original pause instant is kept so that
/// resume math still measures from the first pause.
#[derive(Debug)]
pub struct PauseNotificationsUseCase {
    pub email: String,
    pub now: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NoChain,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for PauseNotificationsUseCase {
    type Response = Vec<NotificationRecord>;
    type Error = UseCaseError;

    const NAME: &'static str = "PauseNotifications";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let lock = ctx.timers.user_lock(&self.email);
        let _guard = lock.lock().await;

        let mut records = ctx.repos.notifications.find_by_email(&self.email).await;
        if records.is_empty() {
            return Err(UseCaseError::NoChain);
        }
        if records.iter().all(|r| r.is_paused()) {
            return Ok(records);
        }

        let now = resolve_now(ctx, self.now);
        ctx.repos
            .notifications
            .set_paused(&self.email, Some(now))
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.timers.cancel_all(&self.email);

        for record in records.iter_mut() {
            record.paused_since = Some(now);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{record_at, setup_ctx_at, EMAIL};
    use skolero_domain::MILLIS_PER_MINUTE;

    async fn seed_active_chain(ctx: &SkoleroContext) {
        let records = vec![
            record_at(10 * MILLIS_PER_MINUTE, 30),
            record_at(40 * MILLIS_PER_MINUTE, 60),
        ];
        ctx.repos
            .notifications
            .replace_chain(EMAIL, &records)
            .await
            .unwrap();
        for record in &records {
            crate::notification::deliver::schedule_record(ctx, record, 0);
        }
    }

    #[tokio::test]
    async fn pausing_stamps_records_and_cancels_timers() {
        let ctx = setup_ctx_at(5 * MILLIS_PER_MINUTE);
        seed_active_chain(&ctx).await;
        assert_eq!(ctx.timers.count(EMAIL), 2);

        let usecase = PauseNotificationsUseCase {
            email: EMAIL.into(),
            now: None,
        };
        let records = execute(usecase, &ctx).await.expect("To pause chain");

        assert!(records.iter().all(|r| r.paused_since == Some(5 * MILLIS_PER_MINUTE)));
        assert_eq!(ctx.timers.count(EMAIL), 0);

        let stored = ctx.repos.notifications.find_by_email(EMAIL).await;
        assert!(stored.iter().all(|r| r.paused_since == Some(5 * MILLIS_PER_MINUTE)));
    }

    #[tokio::test]
    async fn pausing_twice_keeps_the_first_pause_instant() {
        let ctx = setup_ctx_at(5 * MILLIS_PER_MINUTE);
        seed_active_chain(&ctx).await;

        let first = PauseNotificationsUseCase {
            email: EMAIL.into(),
            now: None,
        };
        execute(first, &ctx).await.unwrap();

        let mut ctx_later = ctx.clone();
        ctx_later.sys = std::sync::Arc::new(crate::shared::test_helpers::StaticSys(
            9 * MILLIS_PER_MINUTE,
        ));
        let second = PauseNotificationsUseCase {
            email: EMAIL.into(),
            now: None,
        };
        let records = execute(second, &ctx_later).await.expect("Pause to be idempotent");
        assert!(records.iter().all(|r| r.paused_since == Some(5 * MILLIS_PER_MINUTE)));
    }

    #[tokio::test]
    async fn pausing_without_a_chain_is_not_found() {
        let ctx = setup_ctx_at(0);
        let usecase = PauseNotificationsUseCase {
            email: EMAIL.into(),
            now: None,
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }

    #[tokio::test]
    async fn client_time_is_used_only_when_trusted() {
        let mut ctx = setup_ctx_at(5 * MILLIS_PER_MINUTE);
        ctx.config.trust_client_time = true;
        seed_active_chain(&ctx).await;

        let usecase = PauseNotificationsUseCase {
            email: EMAIL.into(),
            now: Some(7 * MILLIS_PER_MINUTE),
        };
        let records = execute(usecase, &ctx).await.unwrap();
        assert!(records.iter().all(|r| r.paused_since == Some(7 * MILLIS_PER_MINUTE)));
    }
}
