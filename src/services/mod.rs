//! Services module
//!
//! This module contains business logic services

pub mod parent;
pub mod student;
pub mod class;
pub mod subscription;
pub mod enrollment;

// Re-export commonly used services
pub use parent::ParentService;
pub use student::StudentService;
pub use class::ClassService;
pub use subscription::SubscriptionService;
pub use enrollment::EnrollmentService;

use crate::database::{DatabaseService, PgEnrollmentStore};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub parent_service: ParentService,
    pub student_service: StudentService,
    pub class_service: ClassService,
    pub subscription_service: SubscriptionService,
    pub enrollment_service: EnrollmentService<PgEnrollmentStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory backed by the database service
    pub fn new(database: &DatabaseService) -> Self {
        Self {
            parent_service: ParentService::new(database.parents.clone()),
            student_service: StudentService::new(database.students.clone(), database.parents.clone()),
            class_service: ClassService::new(database.classes.clone(), database.students.clone()),
            subscription_service: SubscriptionService::new(database.subscriptions.clone(), database.students.clone()),
            enrollment_service: EnrollmentService::new(database.enrollment.clone()),
        }
    }
}
