use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::get_subscriptions::APIResponse;
use skolero_domain::PushSubscription;
use skolero_infra::SkoleroContext;

pub async fn get_subscriptions_controller(
    http_req: HttpRequest,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = GetSubscriptionsUseCase {
        email: identity.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscriptions| HttpResponse::Ok().json(APIResponse::new(subscriptions)))
        .map_err(|_| ApiError::InternalError)
}

#[derive(Debug)]
struct GetSubscriptionsUseCase {
    email: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionsUseCase {
    type Response = Vec<PushSubscription>;
    type Error = ();

    const NAME: &'static str = "GetSubscriptions";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.subscriptions.find_by_email(&self.email).await)
    }
}
