use crate::error::ApiError;
use crate::notification::deliver::schedule_record;
use crate::notification::subscribers::RemoveCalendarEventOnDelete;
use crate::shared::auth::protect_route;
use crate::shared::clock::resolve_now;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::delete_notification::{APIResponse, PathParams, QueryParams};
use skolero_domain::{collapse_after_delete, deletion_diff, NotificationRecord, ID};
use skolero_infra::{NotificationUpdate, SkoleroContext};

pub async fn delete_notification_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteNotificationUseCase {
        email: identity.email,
        notification_id: path_params.notification_id.clone(),
        now: query_params.0.now,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.survivors)))
        .map_err(|e| match e {
            UseCaseError::NotFound(notification_id) => ApiError::NotFound(format!(
                "The notification with id: {}, was not found",
                notification_id
            )),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

/// Removes one record from the caller's chain and collapses the rest of
/// the chain by exactly the interval the deleted entry would have
/// consumed. Timers are re-armed for the new fire times unless the chain
/// is paused, in which case the shift is only persisted.
#[derive(Debug)]
pub struct DeleteNotificationUseCase {
    pub email: String,
    pub notification_id: ID,
    pub now: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub deleted: NotificationRecord,
    pub survivors: Vec<NotificationRecord>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteNotificationUseCase {
    type Response = UseCaseResponse;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteNotification";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let lock = ctx.timers.user_lock(&self.email);
        let _guard = lock.lock().await;

        let record = match ctx.repos.notifications.find(&self.notification_id).await {
            Some(record) if record.course.email == self.email => record,
            _ => return Err(UseCaseError::NotFound(self.notification_id.clone())),
        };

        let now = resolve_now(ctx, self.now);
        let diff = deletion_diff(&record, now);

        let mut survivors: Vec<NotificationRecord> = ctx
            .repos
            .notifications
            .find_by_email(&self.email)
            .await
            .into_iter()
            .filter(|r| r.id != self.notification_id)
            .collect();
        collapse_after_delete(&mut survivors, diff);

        // Deletion and survivor shift are one atomic write. On failure
        // nothing changed, so the armed timers still match the store.
        let deleted = ctx
            .repos
            .notifications
            .delete_and_shift(
                &self.notification_id,
                &NotificationUpdate::from_records(&survivors),
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))?;

        ctx.timers.cancel_all(&self.email);
        if !deleted.is_paused() {
            for record in &survivors {
                schedule_record(ctx, record, now);
            }
        }

        Ok(UseCaseResponse { deleted, survivors })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RemoveCalendarEventOnDelete {})]
    }
}
