use actix_web::{web, HttpResponse};
use skolero_api_structs::get_status::APIResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthcheck", web::get().to(status_controller));
}

async fn status_controller() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
    })
}
