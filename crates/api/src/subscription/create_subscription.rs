use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::create_subscription::{APIResponse, RequestBody};
use skolero_domain::{PushSubscription, SubscriptionKeys};
use skolero_infra::SkoleroContext;

pub async fn create_subscription_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;
    let body = body.0;

    let usecase = CreateSubscriptionUseCase {
        email: identity.email,
        endpoint: body.endpoint,
        expiration_time: body.expiration_time,
        keys: body.keys.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Created().json(APIResponse::new(subscription)))
        .map_err(|e| match e {
            UseCaseError::InvalidEndpoint => {
                ApiError::BadClientData("Subscription endpoint cannot be empty".into())
            }
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

#[derive(Debug)]
struct CreateSubscriptionUseCase {
    email: String,
    endpoint: String,
    expiration_time: Option<String>,
    keys: SubscriptionKeys,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidEndpoint,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSubscriptionUseCase {
    type Response = PushSubscription;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateSubscription";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        if self.endpoint.trim().is_empty() {
            return Err(UseCaseError::InvalidEndpoint);
        }

        // Browsers resubmit their subscription on every page load. The
        // same endpoint is stored once per user.
        if ctx.repos.subscriptions.exists(&self.email, &self.endpoint).await {
            return ctx
                .repos
                .subscriptions
                .find_by_email(&self.email)
                .await
                .into_iter()
                .find(|s| s.endpoint == self.endpoint)
                .ok_or(UseCaseError::StorageError);
        }

        let mut subscription =
            PushSubscription::new(&self.email, &self.endpoint, self.keys.clone());
        subscription.expiration_time = self.expiration_time.clone();

        ctx.repos
            .subscriptions
            .insert(&subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{setup_ctx_at, EMAIL};

    fn keys() -> SubscriptionKeys {
        SubscriptionKeys {
            auth: "auth-key".into(),
            p256dh: "p256dh-key".into(),
        }
    }

    #[tokio::test]
    async fn resubmitting_same_endpoint_is_idempotent() {
        let ctx = setup_ctx_at(0);

        for _ in 0..2 {
            let usecase = CreateSubscriptionUseCase {
                email: EMAIL.into(),
                endpoint: "https://push.example/abc".into(),
                expiration_time: None,
                keys: keys(),
            };
            execute(usecase, &ctx).await.expect("To store subscription");
        }

        let stored = ctx.repos.subscriptions.find_by_email(EMAIL).await;
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn same_endpoint_for_two_users_is_kept_twice() {
        let ctx = setup_ctx_at(0);

        for email in [EMAIL, "other@skolero.test"] {
            let usecase = CreateSubscriptionUseCase {
                email: email.into(),
                endpoint: "https://push.example/abc".into(),
                expiration_time: None,
                keys: keys(),
            };
            execute(usecase, &ctx).await.expect("To store subscription");
        }

        assert_eq!(ctx.repos.subscriptions.find_by_email(EMAIL).await.len(), 1);
        assert_eq!(
            ctx.repos
                .subscriptions
                .find_by_email("other@skolero.test")
                .await
                .len(),
            1
        );
    }
}
