use crate::notification::delete_notification::DeleteNotificationUseCase;
use crate::notification::schedule_chain::ScheduleChainUseCase;
use crate::shared::usecase::{Subscriber, UseCase};
use skolero_infra::SkoleroContext;
use tracing::warn;

/// Mirrors a freshly scheduled chain into the external calendar. Purely
/// best effort: the chain is already persisted and armed when this runs,
/// and a mirror failure only produces a log line.
pub struct SyncCalendarOnChainReplaced {}

#[async_trait::async_trait(?Send)]
impl Subscriber<ScheduleChainUseCase> for SyncCalendarOnChainReplaced {
    async fn notify(
        &self,
        records: &<ScheduleChainUseCase as UseCase>::Response,
        ctx: &SkoleroContext,
    ) {
        for record in records {
            if let Err(e) = ctx.calendar_mirror.insert_event(record).await {
                warn!(
                    "Unable to mirror notification {} to the calendar: {:?}",
                    record.id, e
                );
            }
        }
    }
}

/// Removes the mirrored calendar event of a deleted notification.
pub struct RemoveCalendarEventOnDelete {}

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteNotificationUseCase> for RemoveCalendarEventOnDelete {
    async fn notify(
        &self,
        res: &<DeleteNotificationUseCase as UseCase>::Response,
        ctx: &SkoleroContext,
    ) {
        if let Err(e) = ctx.calendar_mirror.delete_event(&res.deleted.id).await {
            warn!(
                "Unable to remove calendar event of notification {}: {:?}",
                res.deleted.id, e
            );
        }
    }
}
