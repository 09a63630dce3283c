use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::delete_course::{APIResponse, PathParams};
use skolero_domain::{Course, ID};
use skolero_infra::SkoleroContext;

pub async fn delete_course_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteCourseUseCase {
        email: identity.email,
        course_id: path_params.course_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|course| HttpResponse::Ok().json(APIResponse::new(course)))
        .map_err(|e| match e {
            UseCaseError::NotFound(course_id) => ApiError::NotFound(format!(
                "The course with id: {}, was not found",
                course_id
            )),
            UseCaseError::StorageError => ApiError::InternalError,
        })
}

#[derive(Debug)]
struct DeleteCourseUseCase {
    email: String,
    course_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCourseUseCase {
    type Response = Course;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteCourse";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        // Ownership is checked before deleting so a foreign id reads as
        // missing instead of leaking another user's course.
        match ctx.repos.courses.find(&self.course_id).await {
            Some(course) if course.email == self.email => ctx
                .repos
                .courses
                .delete(&self.course_id)
                .await
                .ok_or(UseCaseError::StorageError),
            _ => Err(UseCaseError::NotFound(self.course_id.clone())),
        }
    }
}
