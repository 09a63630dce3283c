mod helpers;

use chrono::Utc;
use helpers::setup::{spawn_app, spawn_app_with, TestApp};
use helpers::RecordingPushSender;
use skolero_api_structs::{
    create_chain, create_course, create_session, create_subscription, dtos::SubscriptionKeysDTO,
    get_courses, get_subscriptions, NotificationsResponse,
};
use skolero_domain::MILLIS_PER_MINUTE;
use skolero_infra::SkoleroContext;
use std::sync::Arc;
use std::time::Duration;

const EMAIL: &str = "student@skolero.test";

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn chain_item(fire_at: i64, duration_before_next: i64) -> create_chain::ChainItem {
    create_chain::ChainItem {
        course_name: "Linear Algebra".into(),
        course_description: Some("Eigenvalues".into()),
        fire_at,
        duration_before_next,
    }
}

async fn post_chain(app: &TestApp, items: Vec<create_chain::ChainItem>) -> reqwest::Response {
    app.client
        .post(app.url("/notifications"))
        .header("email", EMAIL)
        .json(&create_chain::RequestBody {
            notifications: items,
        })
        .send()
        .await
        .expect("Request to succeed")
}

async fn get_chain(app: &TestApp) -> NotificationsResponse {
    app.client
        .get(app.url("/notifications"))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed")
        .json()
        .await
        .expect("Valid notifications body")
}

#[tokio::test]
async fn healthcheck_works() {
    let app = spawn_app().await;
    let res = app
        .client
        .get(app.url("/healthcheck"))
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let app = spawn_app().await;
    for path in ["/notifications", "/courses", "/subscriptions"] {
        let res = app
            .client
            .get(app.url(path))
            .send()
            .await
            .expect("Request to succeed");
        assert_eq!(res.status().as_u16(), 401);
    }
}

#[tokio::test]
async fn session_token_grants_access() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/session"))
        .json(&create_session::RequestBody {
            email: EMAIL.into(),
        })
        .send()
        .await
        .expect("Request to succeed");
    assert_eq!(res.status().as_u16(), 201);
    let session: create_session::APIResponse = res.json().await.expect("Valid session body");

    let res = app
        .client
        .get(app.url("/courses"))
        .header("authorization", format!("Bearer {}", session.token))
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());

    let res = app
        .client
        .get(app.url("/courses"))
        .header("authorization", "Bearer not-a-real-token")
        .send()
        .await
        .expect("Request to succeed");
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn course_crud_with_search() {
    let app = spawn_app().await;

    for name in ["Linear Algebra", "Organic Chemistry"] {
        let res = app
            .client
            .post(app.url("/courses"))
            .header("email", EMAIL)
            .json(&create_course::RequestBody {
                name: name.into(),
                description: None,
                difficulty: "medium".into(),
                date: now_millis(),
            })
            .send()
            .await
            .expect("Request to succeed");
        assert_eq!(res.status().as_u16(), 201);
    }

    let all: get_courses::APIResponse = app
        .client
        .get(app.url("/courses"))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed")
        .json()
        .await
        .expect("Valid courses body");
    assert_eq!(all.courses.len(), 2);

    let filtered: get_courses::APIResponse = app
        .client
        .get(app.url("/courses?search=algebra"))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed")
        .json()
        .await
        .expect("Valid courses body");
    assert_eq!(filtered.courses.len(), 1);
    assert_eq!(filtered.courses[0].name, "Linear Algebra");

    let res = app
        .client
        .delete(app.url(&format!("/courses/{}", filtered.courses[0].id)))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());

    // Someone else's credentials cannot delete the remaining course
    let remaining: get_courses::APIResponse = app
        .client
        .get(app.url("/courses"))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed")
        .json()
        .await
        .expect("Valid courses body");
    assert_eq!(remaining.courses.len(), 1);
    let res = app
        .client
        .delete(app.url(&format!("/courses/{}", remaining.courses[0].id)))
        .header("email", "other@skolero.test")
        .send()
        .await
        .expect("Request to succeed");
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn duplicate_subscription_is_stored_once() {
    let app = spawn_app().await;

    for _ in 0..2 {
        let res = app
            .client
            .post(app.url("/subscriptions"))
            .header("email", EMAIL)
            .json(&create_subscription::RequestBody {
                endpoint: "https://push.example/abc".into(),
                expiration_time: None,
                keys: SubscriptionKeysDTO {
                    auth: "auth-key".into(),
                    p256dh: "p256dh-key".into(),
                },
            })
            .send()
            .await
            .expect("Request to succeed");
        assert_eq!(res.status().as_u16(), 201);
    }

    let listed: get_subscriptions::APIResponse = app
        .client
        .get(app.url("/subscriptions"))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed")
        .json()
        .await
        .expect("Valid subscriptions body");
    assert_eq!(listed.subscriptions.len(), 1);
}

#[tokio::test]
async fn chain_replacement_rearms_timers() {
    let app = spawn_app().await;
    let now = now_millis();

    let res = post_chain(
        &app,
        vec![
            chain_item(now + 60 * MILLIS_PER_MINUTE, 60),
            chain_item(now + 120 * MILLIS_PER_MINUTE, 60),
        ],
    )
    .await;
    assert_eq!(res.status().as_u16(), 201);
    assert_eq!(app.ctx.timers.count(EMAIL), 2);

    let listed = get_chain(&app).await;
    assert_eq!(listed.notifications.len(), 2);
    assert!(listed.notifications[0].fire_at < listed.notifications[1].fire_at);

    // A new submission replaces the old chain, never merges with it
    let res = post_chain(&app, vec![chain_item(now + 30 * MILLIS_PER_MINUTE, 30)]).await;
    assert_eq!(res.status().as_u16(), 201);
    assert_eq!(app.ctx.timers.count(EMAIL), 1);
    assert_eq!(get_chain(&app).await.notifications.len(), 1);
}

#[tokio::test]
async fn unsorted_chain_is_rejected() {
    let app = spawn_app().await;
    let now = now_millis();

    let res = post_chain(
        &app,
        vec![
            chain_item(now + 120 * MILLIS_PER_MINUTE, 60),
            chain_item(now + 60 * MILLIS_PER_MINUTE, 60),
        ],
    )
    .await;
    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(app.ctx.timers.count(EMAIL), 0);
}

#[tokio::test]
async fn pause_resume_lifecycle() {
    let app = spawn_app().await;
    let now = now_millis();
    let first_fire_at = now + 60 * MILLIS_PER_MINUTE;

    post_chain(
        &app,
        vec![
            chain_item(first_fire_at, 60),
            chain_item(first_fire_at + 60 * MILLIS_PER_MINUTE, 60),
        ],
    )
    .await;

    // Resuming an active chain is refused
    let res = app
        .client
        .post(app.url("/notifications/resume"))
        .header("email", EMAIL)
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Request to succeed");
    assert_eq!(res.status().as_u16(), 409);

    let res = app
        .client
        .post(app.url("/notifications/pause"))
        .header("email", EMAIL)
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());
    assert_eq!(app.ctx.timers.count(EMAIL), 0);
    let paused = get_chain(&app).await;
    assert!(paused.notifications.iter().all(|n| n.paused_since.is_some()));

    let res = app
        .client
        .post(app.url("/notifications/resume"))
        .header("email", EMAIL)
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());
    assert_eq!(app.ctx.timers.count(EMAIL), 2);

    let resumed = get_chain(&app).await;
    assert!(resumed.notifications.iter().all(|n| n.paused_since.is_none()));
    // The first record advanced by the (tiny) time spent paused
    let shifted = resumed.notifications[0].fire_at;
    assert!(shifted >= first_fire_at);
    assert!(shifted < first_fire_at + 10_000);
    // The rest of the chain follows its duration from the new anchor
    assert_eq!(
        resumed.notifications[1].fire_at,
        shifted + 60 * MILLIS_PER_MINUTE
    );
}

#[tokio::test]
async fn deleting_a_notification_collapses_the_chain() {
    let app = spawn_app().await;
    let now = now_millis();

    post_chain(
        &app,
        vec![
            chain_item(now + 60 * MILLIS_PER_MINUTE, 30),
            chain_item(now + 90 * MILLIS_PER_MINUTE, 30),
        ],
    )
    .await;
    let listed = get_chain(&app).await;
    let deleted_id = listed.notifications[0].id.clone();

    let res = app
        .client
        .delete(app.url(&format!("/notifications/{}", deleted_id)))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed");
    assert!(res.status().is_success());

    // diff was ~60 minutes, so the survivor moves from now+90m to ~now+30m
    let remaining = get_chain(&app).await;
    assert_eq!(remaining.notifications.len(), 1);
    let fire_at = remaining.notifications[0].fire_at;
    assert!(fire_at >= now + 30 * MILLIS_PER_MINUTE - 10_000);
    assert!(fire_at <= now + 30 * MILLIS_PER_MINUTE + 10_000);
    assert_eq!(app.ctx.timers.count(EMAIL), 1);

    // Deleting it again is a 404
    let res = app
        .client
        .delete(app.url(&format!("/notifications/{}", deleted_id)))
        .header("email", EMAIL)
        .send()
        .await
        .expect("Request to succeed");
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn fired_notification_is_delivered_to_every_subscription() {
    let mut ctx = SkoleroContext::create_inmemory();
    ctx.config.port = 0;
    let (sender, delivered) = RecordingPushSender::new();
    ctx.push_sender = Arc::new(sender);
    let app = spawn_app_with(ctx).await;

    for endpoint in ["https://push.example/a", "https://push.example/b"] {
        app.client
            .post(app.url("/subscriptions"))
            .header("email", EMAIL)
            .json(&create_subscription::RequestBody {
                endpoint: endpoint.into(),
                expiration_time: None,
                keys: SubscriptionKeysDTO {
                    auth: "auth-key".into(),
                    p256dh: "p256dh-key".into(),
                },
            })
            .send()
            .await
            .expect("Request to succeed");
    }

    let res = post_chain(&app, vec![chain_item(now_millis() + 300, 0)]).await;
    assert_eq!(res.status().as_u16(), 201);
    assert_eq!(app.ctx.timers.count(EMAIL), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 2);
    assert!(delivered.contains(&"https://push.example/a".to_string()));
    assert!(delivered.contains(&"https://push.example/b".to_string()));
    assert_eq!(app.ctx.timers.count(EMAIL), 0);
}
