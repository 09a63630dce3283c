use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `Course` a user wants to be reminded to revise. The `date` is the
/// timestamp in millis of the course occurrence the revision plan is
/// anchored to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: ID,
    /// Email of the owning user
    pub email: String,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub date: i64,
}

impl Course {
    pub fn new(email: &str, name: &str, difficulty: &str, date: i64) -> Self {
        Self {
            id: Default::default(),
            email: email.to_string(),
            name: name.to_string(),
            description: None,
            difficulty: difficulty.to_string(),
            date,
        }
    }
}

impl Entity for Course {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
