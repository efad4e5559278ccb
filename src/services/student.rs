//! Student service implementation
//!
//! Students always belong to an existing parent; creation and re-parenting
//! check the parent first.

use tracing::{debug, info};
use crate::database::repositories::{ParentRepository, StudentRepository};
use crate::models::student::{Student, StudentDetails, CreateStudentRequest, UpdateStudentRequest};
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::logging::log_entity_created;

#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
    parent_repository: ParentRepository,
}

impl StudentService {
    pub fn new(student_repository: StudentRepository, parent_repository: ParentRepository) -> Self {
        Self {
            student_repository,
            parent_repository,
        }
    }

    pub async fn create_student(&self, request: CreateStudentRequest) -> Result<Student> {
        let student = request.validate()?;
        self.ensure_parent_exists(student.parent_id).await?;

        let student = self.student_repository.create(student).await?;
        log_entity_created("student", student.id);
        Ok(student)
    }

    pub async fn get_student(&self, student_id: i64) -> Result<Student> {
        self.student_repository
            .find_by_id(student_id)
            .await?
            .ok_or(SchoolDeskError::StudentNotFound { student_id })
    }

    /// Student together with the parent record
    pub async fn get_student_details(&self, student_id: i64) -> Result<StudentDetails> {
        debug!(student_id = student_id, "Getting student details");
        let student = self.get_student(student_id).await?;
        let parent = self
            .parent_repository
            .find_by_id(student.parent_id)
            .await?
            .ok_or(SchoolDeskError::ParentNotFound { parent_id: student.parent_id })?;

        Ok(StudentDetails { student, parent })
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.student_repository.list().await
    }

    pub async fn update_student(&self, student_id: i64, request: UpdateStudentRequest) -> Result<Student> {
        let request = request.validate()?;
        if let Some(parent_id) = request.parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let student = self
            .student_repository
            .update(student_id, request)
            .await?
            .ok_or(SchoolDeskError::StudentNotFound { student_id })?;

        info!(student_id = student_id, "Student updated");
        Ok(student)
    }

    async fn ensure_parent_exists(&self, parent_id: i64) -> Result<()> {
        match self.parent_repository.find_by_id(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(SchoolDeskError::ParentNotFound { parent_id }),
        }
    }
}
