use super::ICourseRepo;
use skolero_domain::{Course, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCourseRepo {
    pool: PgPool,
}

impl PostgresCourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CourseRaw {
    course_uid: Uuid,
    email: String,
    name: String,
    description: Option<String>,
    difficulty: String,
    date: i64,
}

impl From<CourseRaw> for Course {
    fn from(raw: CourseRaw) -> Self {
        Self {
            id: raw.course_uid.into(),
            email: raw.email,
            name: raw.name,
            description: raw.description,
            difficulty: raw.difficulty,
            date: raw.date,
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for PostgresCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO courses
            (course_uid, email, name, description, difficulty, date)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(course.id.inner_ref())
        .bind(&course.email)
        .bind(&course.name)
        .bind(&course.description)
        .bind(&course.difficulty)
        .bind(course.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        sqlx::query_as::<_, CourseRaw>(
            r#"
            SELECT * FROM courses
            WHERE course_uid = $1
            "#,
        )
        .bind(course_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|raw| raw.into())
    }

    async fn find_by_email(&self, email: &str) -> Vec<Course> {
        sqlx::query_as::<_, CourseRaw>(
            r#"
            SELECT * FROM courses
            WHERE email = $1
            ORDER BY date ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }

    async fn delete(&self, course_id: &ID) -> Option<Course> {
        match sqlx::query_as::<_, CourseRaw>(
            r#"
            DELETE FROM courses
            WHERE course_uid = $1
            RETURNING *
            "#,
        )
        .bind(course_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(raw) => Some(raw.into()),
            Err(_) => None,
        }
    }
}
