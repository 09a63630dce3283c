mod create_session;

use actix_web::web;
use create_session::create_session_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::post().to(create_session_controller));
}
