use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use skolero_api_structs::create_session::{APIResponse, RequestBody};
use skolero_infra::SkoleroContext;

pub async fn create_session_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = CreateSessionUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|token| HttpResponse::Created().json(APIResponse::new(token)))
        .map_err(|e| match e {
            UseCaseError::InvalidEmail => {
                ApiError::BadClientData("Provided email is not valid".into())
            }
        })
}

#[derive(Debug)]
struct CreateSessionUseCase {
    email: String,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidEmail,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSessionUseCase {
    type Response = String;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateSession";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(UseCaseError::InvalidEmail);
        }
        Ok(ctx.token_cache.issue(email))
    }
}
