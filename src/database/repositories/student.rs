//! Student repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::student::{Student, NewStudent, UpdateStudentRequest};
use crate::utils::errors::SchoolDeskError;

const STUDENT_COLUMNS: &str = "id, parent_id, name, dob, gender, current_grade, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new student
    pub async fn create(&self, student: NewStudent) -> Result<Student, SchoolDeskError> {
        let query = format!(
            r#"
            INSERT INTO students (parent_id, name, dob, gender, current_grade, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(student.parent_id)
            .bind(student.name)
            .bind(student.dob)
            .bind(student.gender.map(|g| g.as_str()))
            .bind(student.current_grade)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(student)
    }

    /// Find student by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, SchoolDeskError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    /// Update student; absent fields keep their value
    pub async fn update(&self, id: i64, request: UpdateStudentRequest) -> Result<Option<Student>, SchoolDeskError> {
        let query = format!(
            r#"
            UPDATE students
            SET parent_id = COALESCE($2, parent_id),
                name = COALESCE($3, name),
                dob = COALESCE($4, dob),
                gender = COALESCE($5, gender),
                current_grade = COALESCE($6, current_grade),
                updated_at = $7
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        );

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(request.parent_id)
            .bind(request.name)
            .bind(request.dob)
            .bind(request.gender)
            .bind(request.current_grade)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    /// List all students
    pub async fn list(&self) -> Result<Vec<Student>, SchoolDeskError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id ASC");

        let students = sqlx::query_as::<_, Student>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// Students registered in a class, in registration order
    pub async fn list_by_class(&self, class_id: i64) -> Result<Vec<Student>, SchoolDeskError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT s.id, s.parent_id, s.name, s.dob, s.gender, s.current_grade, s.created_at, s.updated_at
            FROM students s
            INNER JOIN class_registrations cr ON s.id = cr.student_id
            WHERE cr.class_id = $1
            ORDER BY cr.registered_at ASC
            "#
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}
