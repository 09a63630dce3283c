use super::ICourseRepo;
use crate::repos::shared::inmemory_repo::*;
use skolero_domain::{Course, ID};
use std::sync::Mutex;

pub struct InMemoryCourseRepo {
    courses: Mutex<Vec<Course>>,
}

impl InMemoryCourseRepo {
    pub fn new() -> Self {
        Self {
            courses: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for InMemoryCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        insert(course, &self.courses);
        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        find(course_id, &self.courses)
    }

    async fn find_by_email(&self, email: &str) -> Vec<Course> {
        find_by(&self.courses, |c: &Course| c.email == email)
    }

    async fn delete(&self, course_id: &ID) -> Option<Course> {
        delete(course_id, &self.courses)
    }
}
