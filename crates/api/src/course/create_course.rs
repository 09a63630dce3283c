use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::create_course::{APIResponse, RequestBody};
use skolero_domain::Course;
use skolero_infra::SkoleroContext;

pub async fn create_course_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = CreateCourseUseCase {
        email: identity.email,
        name: body.0.name,
        description: body.0.description,
        difficulty: body.0.difficulty,
        date: body.0.date,
    };

    execute(usecase, &ctx)
        .await
        .map(|course| HttpResponse::Created().json(APIResponse::new(course)))
        .map_err(|e| match e {
            UseCaseError::InvalidCourse(field) => ApiError::BadClientData(format!(
                "Course field `{}` cannot be empty",
                field
            )),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

#[derive(Debug)]
struct CreateCourseUseCase {
    email: String,
    name: String,
    description: Option<String>,
    difficulty: String,
    date: i64,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidCourse(&'static str),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCourseUseCase {
    type Response = Course;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateCourse";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidCourse("name"));
        }
        if self.difficulty.trim().is_empty() {
            return Err(UseCaseError::InvalidCourse("difficulty"));
        }

        let mut course = Course::new(&self.email, &self.name, &self.difficulty, self.date);
        course.description = self.description.clone();

        ctx.repos
            .courses
            .insert(&course)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(course)
    }
}
