use serde::{Deserialize, Serialize};
use skolero_domain::{Course, ID};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDTO {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub date: i64,
}

impl CourseDTO {
    pub fn new(course: Course) -> Self {
        Self {
            id: course.id,
            email: course.email,
            name: course.name,
            description: course.description,
            difficulty: course.difficulty,
            date: course.date,
        }
    }
}
