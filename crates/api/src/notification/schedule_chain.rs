use crate::error::ApiError;
use crate::notification::deliver::schedule_record;
use crate::notification::subscribers::SyncCalendarOnChainReplaced;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::create_chain::{APIResponse, ChainItem, RequestBody};
use skolero_domain::{validate_chain, ChainError, CourseSnapshot, NotificationRecord};
use skolero_infra::SkoleroContext;

pub async fn schedule_chain_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = ScheduleChainUseCase {
        email: identity.email,
        items: body.0.notifications,
    };

    execute(usecase, &ctx)
        .await
        .map(|records| HttpResponse::Created().json(APIResponse::new(records)))
        .map_err(|e| match e {
            UseCaseError::InvalidChain(e) => ApiError::BadClientData(e.to_string()),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// Replaces the caller's whole notification chain: the prior chain is
/// deleted from the store, the submitted records are persisted and one
/// timer is armed per future record. There is no partial merge with a
/// previous chain.
#[derive(Debug)]
pub struct ScheduleChainUseCase {
    pub email: String,
    pub items: Vec<ChainItem>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidChain(ChainError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleChainUseCase {
    type Response = Vec<NotificationRecord>;
    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleChain";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let lock = ctx.timers.user_lock(&self.email);
        let _guard = lock.lock().await;

        let records: Vec<NotificationRecord> = self
            .items
            .iter()
            .map(|item| {
                NotificationRecord::new(
                    CourseSnapshot {
                        email: self.email.clone(),
                        name: item.course_name.clone(),
                        description: item.course_description.clone(),
                    },
                    item.fire_at,
                    item.duration_before_next,
                )
            })
            .collect();
        validate_chain(&records).map_err(UseCaseError::InvalidChain)?;

        // Persist before touching the live timers. When the write fails
        // the previous chain stays armed and the caller sees the error.
        ctx.repos
            .notifications
            .replace_chain(&self.email, &records)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.timers.cancel_all(&self.email);
        let now = ctx.sys.get_timestamp_millis();
        for record in &records {
            schedule_record(ctx, record, now);
        }

        Ok(records)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncCalendarOnChainReplaced {})]
    }
}
