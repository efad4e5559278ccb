//! Enrollment service
//!
//! Runs the registration arbiter and session consumption each inside one
//! store transaction. The transaction commits only when the arbiter accepts;
//! on any error it is dropped and rolls back.

use tracing::debug;
use crate::models::{ClassRegistration, Subscription};
use crate::scheduling::arbiter::{self, EnrollmentStore, EnrollmentTransaction};
use crate::utils::errors::Result;
use crate::utils::logging::{log_registration, log_session_used};

#[derive(Clone)]
pub struct EnrollmentService<S> {
    store: S,
}

impl<S: EnrollmentStore> EnrollmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a student for a class
    pub async fn register_student(&self, class_id: i64, student_id: i64) -> Result<ClassRegistration> {
        let result = self.try_register(class_id, student_id).await;
        log_registration(class_id, student_id, result.as_ref().err());
        result
    }

    /// Consume one session of a subscription owned by `student_id`
    pub async fn mark_session_used(&self, subscription_id: i64, student_id: i64) -> Result<Subscription> {
        let mut tx = self.store.begin().await?;
        let subscription = arbiter::mark_session_used(&mut tx, subscription_id, student_id).await?;
        tx.commit().await?;

        log_session_used(subscription_id, student_id, subscription.used_sessions, subscription.total_sessions);
        Ok(subscription)
    }

    async fn try_register(&self, class_id: i64, student_id: i64) -> Result<ClassRegistration> {
        debug!(class_id = class_id, student_id = student_id, "Opening registration transaction");
        let mut tx = self.store.begin().await?;
        let registration = arbiter::register_student(&mut tx, class_id, student_id).await?;
        tx.commit().await?;
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::database::memory::MemoryEnrollmentStore;
    use crate::models::NewClassSession;
    use crate::scheduling::days::Weekday;
    use crate::utils::errors::SchoolDeskError;

    #[tokio::test]
    async fn test_rejected_registration_commits_nothing() {
        let store = MemoryEnrollmentStore::new();
        let class = store
            .insert_class(NewClassSession {
                subject: "Chemistry".to_string(),
                teacher_name: "Dr. Ray".to_string(),
                max_students: 1,
                time_slot: "08:00-09:00".to_string(),
                days_of_week: vec![Weekday::Tuesday],
            })
            .await;
        let service = EnrollmentService::new(store.clone());

        service.register_student(class.id, 1).await.unwrap();
        assert_matches!(
            service.register_student(class.id, 2).await,
            Err(SchoolDeskError::ClassFull { max_students: 1, .. })
        );
        assert_matches!(
            service.register_student(99, 2).await,
            Err(SchoolDeskError::ClassNotFound { class_id: 99 })
        );

        assert_eq!(store.registrations().await.len(), 1);
    }
}
