//! Class service implementation

use tracing::debug;
use crate::database::repositories::{ClassRepository, StudentRepository};
use crate::models::class::{ClassSession, ClassQuery, CreateClassRequest};
use crate::models::student::Student;
use crate::scheduling::days::resolve_day_query;
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::logging::log_entity_created;

#[derive(Clone)]
pub struct ClassService {
    class_repository: ClassRepository,
    student_repository: StudentRepository,
}

impl ClassService {
    pub fn new(class_repository: ClassRepository, student_repository: StudentRepository) -> Self {
        Self {
            class_repository,
            student_repository,
        }
    }

    /// Validate, normalize and store a new class
    pub async fn create_class(&self, request: CreateClassRequest) -> Result<ClassSession> {
        let class = request.validate()?;
        let class = self.class_repository.create(class).await?;
        log_entity_created("class", class.id);
        Ok(class)
    }

    pub async fn get_class(&self, class_id: i64) -> Result<ClassSession> {
        self.class_repository
            .find_by_id(class_id)
            .await?
            .ok_or(SchoolDeskError::ClassNotFound { class_id })
    }

    /// Classes meeting on any day the query resolves to
    pub async fn list_classes(&self, query: ClassQuery) -> Result<Vec<ClassSession>> {
        let days = resolve_day_query(query.day.as_deref(), &query.days)?;
        debug!(days = ?days, "Listing classes");
        self.class_repository.list_on_days(&days).await
    }

    pub async fn list_class_students(&self, class_id: i64) -> Result<Vec<Student>> {
        self.get_class(class_id).await?;
        self.student_repository.list_by_class(class_id).await
    }
}
