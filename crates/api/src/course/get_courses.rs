use crate::error::ApiError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use skolero_api_structs::get_courses::{APIResponse, QueryParams};
use skolero_domain::Course;
use skolero_infra::SkoleroContext;

pub async fn get_courses_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<SkoleroContext>,
) -> Result<HttpResponse, ApiError> {
    let identity = protect_route(&http_req, &ctx).await?;

    let usecase = GetCoursesUseCase {
        email: identity.email,
        search: query_params.0.search,
    };

    execute(usecase, &ctx)
        .await
        .map(|courses| HttpResponse::Ok().json(APIResponse::new(courses)))
        .map_err(|_| ApiError::InternalError)
}

#[derive(Debug)]
struct GetCoursesUseCase {
    email: String,
    search: Option<String>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCoursesUseCase {
    type Response = Vec<Course>;
    type Error = ();

    const NAME: &'static str = "GetCourses";

    async fn execute(&mut self, ctx: &SkoleroContext) -> Result<Self::Response, Self::Error> {
        let mut courses = ctx.repos.courses.find_by_email(&self.email).await;

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            courses.retain(|c| c.name.to_lowercase().contains(&needle));
        }

        Ok(courses)
    }
}
