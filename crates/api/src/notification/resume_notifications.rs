use crate::error::ApiError;
use crate::notification::deliver::schedule_record;
use crate::shared::auth::protect_route;
use crate::shared::clock::resolve_now;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::resume_notifications::{APIResponse, RequestBody};
use skolero_domain::{shift_for_resume, ChainError, NotificationRecord};
use skolero_infra::{NotificationUpdate, SkoleroContext};

pub async fn resume_notifications_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = ResumeNotificationsUseCase {
        email: identity.email,
        now: body.0.now,
    };

    execute(usecase, &ctx)
        .await
        .map(|records| HttpResponse::Ok().json(APIResponse::new(records)))
        .map_err(|e| match e {
            UseCaseError::NoChain => {
                ApiError::NotFound("You have no notification chain to resume".into())
            }
            UseCaseError::NotPaused => {
                ApiError::Conflict("Your notification chain is not paused".into())
            }
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// Unfreezes the caller's chain. The first record advances by the real
/// time spent paused and the rest of the chain is rebuilt forward from
/// it, then timers are re-armed for the new fire times. Resuming an
/// active chain is a conflict rather than a silent no-op.
#[derive(Debug)]
pub struct ResumeNotificationsUseCase {
    pub email: String,
    pub now: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NoChain,
    NotPaused,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResumeNotificationsUseCase {
    type Response = Vec<NotificationRecord>;
    type Error = UseCaseError;

    const NAME: &'static str = "ResumeNotifications";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let lock = ctx.timers.user_lock(&self.email);
        let _guard = lock.lock().await;

        let mut records = ctx.repos.notifications.find_by_email(&self.email).await;
        if records.is_empty() {
            return Err(UseCaseError::NoChain);
        }

        let now = resolve_now(ctx, self.now);
        shift_for_resume(&mut records, now).map_err(|e| match e {
            ChainError::NotPaused => UseCaseError::NotPaused,
            _ => UseCaseError::StorageError,
        })?;

        // One atomic write: a failure must not leave the chain shifted but
        // still paused, or a retried resume would shift it twice.
        ctx.repos
            .notifications
            .resume_chain(&self.email, &NotificationUpdate::from_records(&records))
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.timers.cancel_all(&self.email);
        for record in &records {
            schedule_record(ctx, record, now);
        }

        Ok(records)
    }
}
