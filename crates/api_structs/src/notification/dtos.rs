use serde::{Deserialize, Serialize};
use skolero_domain::{CourseSnapshot, NotificationRecord, ID};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSnapshotDTO {
    pub email: String,
    pub name: String,
    pub description: Option<String>,
}

impl CourseSnapshotDTO {
    pub fn new(course: CourseSnapshot) -> Self {
        Self {
            email: course.email,
            name: course.name,
            description: course.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub course: CourseSnapshotDTO,
    pub fire_at: i64,
    pub duration_before_next: i64,
    pub paused_since: Option<i64>,
}

impl NotificationDTO {
    pub fn new(record: NotificationRecord) -> Self {
        Self {
            id: record.id,
            course: CourseSnapshotDTO::new(record.course),
            fire_at: record.fire_at,
            duration_before_next: record.duration_before_next,
            paused_since: record.paused_since,
        }
    }
}
