use crate::notification::deliver::schedule_record;
use skolero_infra::SkoleroContext;
use tracing::info;

/// Rebuilds the timer table from the store on process start. Only future,
/// non paused records are re-armed: paused chains wait for an explicit
/// resume, and records whose fire time elapsed while the process was down
/// are dropped silently.
pub async fn rehydrate_timers(ctx: &SkoleroContext) {
    let now = ctx.sys.get_timestamp_millis();
    let records = ctx.repos.notifications.find_active_future(now).await;
    info!("Rehydrating {} notification timer(s)", records.len());
    for record in &records {
        schedule_record(ctx, record, now);
    }
}
