use futures::future::join_all;
use skolero_domain::NotificationRecord;
use skolero_infra::SkoleroContext;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The web push payload the service worker renders. Every field the
/// worker reads lives under `notification`.
pub fn build_payload(record: &NotificationRecord) -> serde_json::Value {
    serde_json::json!({
        "notification": {
            "title": format!("Time to revise {}!", record.course.name),
            "body": record.course.description.clone().unwrap_or_else(|| "Your revision session is due.".to_string()),
            "icon": "assets/icons/icon-128x128.png",
            "vibrate": [100, 50, 100],
            "data": {
                "dateOfArrival": record.fire_at,
                "primaryKey": record.id.as_string(),
            },
            "actions": [
                { "action": "explore", "title": "Start revising" }
            ]
        }
    })
}

/// Attempts delivery of the fired record to every push subscription its
/// owner has registered. Each attempt is independent: one expired or
/// unreachable endpoint never blocks the others. Failures are logged and
/// never retried.
pub async fn deliver_notification(ctx: SkoleroContext, record: NotificationRecord) {
    let email = record.course.email.clone();
    let subscriptions = ctx.repos.subscriptions.find_by_email(&email).await;
    if subscriptions.is_empty() {
        debug!("No push subscriptions for {}, skipping delivery", email);
        return;
    }

    let payload = build_payload(&record);
    let attempts = subscriptions
        .iter()
        .map(|subscription| ctx.push_sender.send(subscription, &payload));

    let mut delivered = 0;
    for (subscription, res) in subscriptions.iter().zip(join_all(attempts).await) {
        match res {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                "Failed to deliver notification {} to endpoint {}: {:?}",
                record.id, subscription.endpoint, e
            ),
        }
    }
    info!(
        "Delivered notification {} for {} to {}/{} subscription(s)",
        record.id,
        email,
        delivered,
        subscriptions.len()
    );
}

/// Arms a timer that delivers the record when its fire time is reached.
/// Paused and past-dated records are skipped: they stay queryable in the
/// store but never produce a live timer. The cutoff is inclusive, a record
/// due exactly now is armed with a zero delay, the same boundary
/// `find_active_future` uses for rehydration.
pub fn schedule_record(ctx: &SkoleroContext, record: &NotificationRecord, now: i64) {
    if record.is_paused() {
        return;
    }
    if record.fire_at < now {
        debug!(
            "Notification {} for {} was due at {} which already passed, not scheduling",
            record.id, record.course.email, record.fire_at
        );
        return;
    }

    let delay = Duration::from_millis((record.fire_at - now) as u64);
    let task_ctx = ctx.clone();
    let task_record = record.clone();
    ctx.timers.register(
        &record.course.email,
        record.id.clone(),
        delay,
        async move {
            deliver_notification(task_ctx, task_record).await;
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{record_at, setup_ctx_at, subscription, RecordingPushSender, EMAIL};
    use std::sync::Arc;

    #[tokio::test]
    async fn one_failing_endpoint_does_not_block_the_others() {
        let mut ctx = setup_ctx_at(0);
        let (mut sender, delivered) = RecordingPushSender::new();
        sender.failing_endpoints = vec!["https://push.example/expired".into()];
        ctx.push_sender = Arc::new(sender);

        for endpoint in [
            "https://push.example/a",
            "https://push.example/expired",
            "https://push.example/b",
        ] {
            ctx.repos
                .subscriptions
                .insert(&subscription(EMAIL, endpoint))
                .await
                .unwrap();
        }

        deliver_notification(ctx, record_at(0, 30)).await;

        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        assert!(delivered.contains(&"https://push.example/a".to_string()));
        assert!(delivered.contains(&"https://push.example/b".to_string()));
    }

    #[tokio::test]
    async fn delivery_without_subscriptions_is_a_noop() {
        let ctx = setup_ctx_at(0);
        deliver_notification(ctx, record_at(0, 30)).await;
    }

    #[tokio::test]
    async fn past_and_paused_records_are_not_scheduled() {
        let ctx = setup_ctx_at(1000);

        schedule_record(&ctx, &record_at(500, 30), 1000);
        assert_eq!(ctx.timers.count(EMAIL), 0);

        let mut paused = record_at(5000, 30);
        paused.paused_since = Some(900);
        schedule_record(&ctx, &paused, 1000);
        assert_eq!(ctx.timers.count(EMAIL), 0);

        schedule_record(&ctx, &record_at(5000, 30), 1000);
        assert_eq!(ctx.timers.count(EMAIL), 1);
    }

    #[tokio::test]
    async fn record_due_exactly_now_is_armed() {
        let ctx = setup_ctx_at(1000);
        schedule_record(&ctx, &record_at(1000, 30), 1000);
        assert_eq!(ctx.timers.count(EMAIL), 1);
    }

    #[test]
    fn payload_has_the_notification_shape() {
        let record = record_at(42, 30);
        let payload = build_payload(&record);
        assert_eq!(
            payload["notification"]["title"],
            "Time to revise Linear Algebra!"
        );
        assert_eq!(payload["notification"]["data"]["dateOfArrival"], 42);
        assert_eq!(
            payload["notification"]["data"]["primaryKey"],
            record.id.as_string()
        );
    }
}
