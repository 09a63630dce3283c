pub(crate) mod deliver;
mod delete_notification;
mod get_notifications;
mod pause_notifications;
mod resume_notifications;
mod schedule_chain;
mod subscribers;

use actix_web::web;
use delete_notification::delete_notification_controller;
use get_notifications::get_notifications_controller;
use pause_notifications::pause_notifications_controller;
use resume_notifications::resume_notifications_controller;
use schedule_chain::schedule_chain_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::post().to(schedule_chain_controller));
    cfg.route("/notifications", web::get().to(get_notifications_controller));
    cfg.route("/notifications/pause", web::post().to(pause_notifications_controller));
    cfg.route(
        "/notifications/resume",
        web::post().to(resume_notifications_controller),
    );
    cfg.route(
        "/notifications/{notification_id}",
        web::delete().to(delete_notification_controller),
    );
}
