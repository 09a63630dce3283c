use crate::dtos::CourseDTO;
use serde::{Deserialize, Serialize};
use skolero_domain::{Course, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub course: CourseDTO,
}

impl CourseResponse {
    pub fn new(course: Course) -> Self {
        Self {
            course: CourseDTO::new(course),
        }
    }
}

pub mod create_course {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub description: Option<String>,
        pub difficulty: String,
        pub date: i64,
    }

    pub type APIResponse = CourseResponse;
}

pub mod get_courses {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub search: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub courses: Vec<CourseDTO>,
    }

    impl APIResponse {
        pub fn new(courses: Vec<Course>) -> Self {
            Self {
                courses: courses.into_iter().map(CourseDTO::new).collect(),
            }
        }
    }
}

pub mod delete_course {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
    }

    pub type APIResponse = CourseResponse;
}
