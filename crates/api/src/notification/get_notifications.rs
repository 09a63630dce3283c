use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::get_notifications::APIResponse;
use skolero_domain::NotificationRecord;
use skolero_infra::SkoleroContext;

pub async fn get_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationsUseCase {
        email: identity.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|records| HttpResponse::Ok().json(APIResponse::new(records)))
        .map_err(|_| ApiError::InternalError)
}

#[derive(Debug)]
struct GetNotificationsUseCase {
    email: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<NotificationRecord>;
    type Error = ();

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        // Repo contract: ordered by fire time ascending
        Ok(ctx.repos.notifications.find_by_email(&self.email).await)
    }
}
