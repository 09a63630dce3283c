use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Snapshot of the course a notification was created for, embedded in the
/// `NotificationRecord` at creation time. Later edits to the course do not
/// retroactively change already created notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshot {
    /// Email of the owning user
    pub email: String,
    pub name: String,
    pub description: Option<String>,
}

/// One entry in a user's reminder chain.
///
/// Within a user's active chain records are totally ordered by `fire_at`
/// ascending, and that order matches repeated application of
/// `duration_before_next` from the earliest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: ID,
    pub course: CourseSnapshot,
    /// Timestamp in millis at which this notification is due for delivery
    pub fire_at: i64,
    /// Minutes between this notification and the next one in the chain.
    /// Only used to recompute downstream fire times when an earlier chain
    /// member moves.
    pub duration_before_next: i64,
    /// When set, the record is suspended and excluded from live scheduling
    pub paused_since: Option<i64>,
}

impl NotificationRecord {
    pub fn new(course: CourseSnapshot, fire_at: i64, duration_before_next: i64) -> Self {
        Self {
            id: Default::default(),
            course,
            fire_at,
            duration_before_next,
            paused_since: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }
}

impl Entity for NotificationRecord {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
