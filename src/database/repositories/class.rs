//! Class repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::class::{ClassRow, ClassSession, NewClassSession};
use crate::scheduling::days::Weekday;
use crate::utils::errors::SchoolDeskError;

pub(crate) const CLASS_COLUMNS: &str = "id, subject, teacher_name, max_students, time_slot, days_of_week, created_at";

/// Day symbols as bound to a `TEXT[]` parameter
pub(crate) fn day_symbols(days: &[Weekday]) -> Vec<String> {
    days.iter().map(|day| day.as_str().to_string()).collect()
}

#[derive(Clone, Debug)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new class
    pub async fn create(&self, class: NewClassSession) -> Result<ClassSession, SchoolDeskError> {
        let query = format!(
            r#"
            INSERT INTO classes (subject, teacher_name, max_students, time_slot, days_of_week, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CLASS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ClassRow>(&query)
            .bind(class.subject)
            .bind(class.teacher_name)
            .bind(class.max_students)
            .bind(class.time_slot)
            .bind(day_symbols(&class.days_of_week))
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        ClassSession::try_from(row)
    }

    /// Find class by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ClassSession>, SchoolDeskError> {
        let query = format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1");

        let row = sqlx::query_as::<_, ClassRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ClassSession::try_from).transpose()
    }

    /// Classes meeting on at least one of `days`
    pub async fn list_on_days(&self, days: &[Weekday]) -> Result<Vec<ClassSession>, SchoolDeskError> {
        let query = format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE days_of_week && $1::text[] ORDER BY id ASC"
        );

        let rows = sqlx::query_as::<_, ClassRow>(&query)
            .bind(day_symbols(days))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ClassSession::try_from).collect()
    }

    /// Number of students registered in a class
    pub async fn count_registrations(&self, class_id: i64) -> Result<i64, SchoolDeskError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM class_registrations WHERE class_id = $1"
        )
        .bind(class_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
