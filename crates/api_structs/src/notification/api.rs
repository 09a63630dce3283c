use crate::dtos::NotificationDTO;
use serde::{Deserialize, Serialize};
use skolero_domain::{NotificationRecord, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationDTO>,
}

impl NotificationsResponse {
    pub fn new(records: Vec<NotificationRecord>) -> Self {
        Self {
            notifications: records.into_iter().map(NotificationDTO::new).collect(),
        }
    }
}

pub mod create_chain {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChainItem {
        pub course_name: String,
        pub course_description: Option<String>,
        pub fire_at: i64,
        pub duration_before_next: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub notifications: Vec<ChainItem>,
    }

    pub type APIResponse = NotificationsResponse;
}

pub mod get_notifications {
    use super::*;

    pub type APIResponse = NotificationsResponse;
}

pub mod delete_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Honored only when the server trusts client time
        pub now: Option<i64>,
    }

    pub type APIResponse = NotificationsResponse;
}

pub mod pause_notifications {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Honored only when the server trusts client time
        pub now: Option<i64>,
    }

    pub type APIResponse = NotificationsResponse;
}

pub mod resume_notifications {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Honored only when the server trusts client time
        pub now: Option<i64>,
    }

    pub type APIResponse = NotificationsResponse;
}
