use crate::notification::NotificationRecord;
use thiserror::Error;

pub const MILLIS_PER_MINUTE: i64 = 1000 * 60;

#[derive(Error, Debug, PartialEq)]
pub enum ChainError {
    #[error("A notification chain cannot be empty")]
    Empty,
    #[error("Notification fire times must be strictly ascending")]
    NotSorted,
    #[error("Notification durations must be non-negative")]
    NegativeDuration,
    #[error("The notification chain is not paused")]
    NotPaused,
}

/// Validates a chain submitted by a client. Records must be in chain order:
/// strictly ascending `fire_at` with non-negative durations. The exact
/// correspondence between gaps and `duration_before_next` is not enforced
/// on input, durations only matter once a recomputation shifts the chain.
pub fn validate_chain(records: &[NotificationRecord]) -> Result<(), ChainError> {
    if records.is_empty() {
        return Err(ChainError::Empty);
    }
    if records.iter().any(|r| r.duration_before_next < 0) {
        return Err(ChainError::NegativeDuration);
    }
    for pair in records.windows(2) {
        if pair[1].fire_at <= pair[0].fire_at {
            return Err(ChainError::NotSorted);
        }
    }
    Ok(())
}

/// Rewrites the fire times of `records` in chain order: the first record
/// fires at `first_fire_at` and every subsequent record fires
/// `duration_before_next` minutes after its predecessor.
pub fn rebuild_forward(records: &mut [NotificationRecord], first_fire_at: i64) {
    let mut fire_at = first_fire_at;
    for i in 0..records.len() {
        records[i].fire_at = fire_at;
        fire_at += records[i].duration_before_next * MILLIS_PER_MINUTE;
    }
}

/// Resume math: the first record advances by the real time elapsed between
/// `paused_since` and `now`, the rest of the chain is rebuilt forward from
/// it. Clears the pause marker on every record.
pub fn shift_for_resume(records: &mut [NotificationRecord], now: i64) -> Result<(), ChainError> {
    let first = records.first().ok_or(ChainError::Empty)?;
    let paused_since = first.paused_since.ok_or(ChainError::NotPaused)?;

    let elapsed = now - paused_since;
    rebuild_forward(records, first.fire_at + elapsed);
    for record in records.iter_mut() {
        record.paused_since = None;
    }
    Ok(())
}

/// The signed time the deleted record would still have consumed: its fire
/// time (or pause snapshot when the chain is paused) relative to `now`.
pub fn deletion_diff(deleted: &NotificationRecord, now: i64) -> i64 {
    deleted.paused_since.unwrap_or(deleted.fire_at) - now
}

/// Delete math: the surviving chain collapses by exactly `diff`, the
/// interval the deleted entry would have consumed. No-op for an empty
/// survivor set.
pub fn collapse_after_delete(survivors: &mut [NotificationRecord], diff: i64) {
    if let Some(first) = survivors.first() {
        let first_fire_at = first.fire_at - diff;
        rebuild_forward(survivors, first_fire_at);
    }
}
