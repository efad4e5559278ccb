//! Subscription service implementation

use chrono::Utc;
use crate::database::repositories::{StudentRepository, SubscriptionRepository};
use crate::models::subscription::{Subscription, SubscriptionWithStudent, CreateSubscriptionRequest};
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::logging::log_entity_created;

#[derive(Clone)]
pub struct SubscriptionService {
    subscription_repository: SubscriptionRepository,
    student_repository: StudentRepository,
}

impl SubscriptionService {
    pub fn new(subscription_repository: SubscriptionRepository, student_repository: StudentRepository) -> Self {
        Self {
            subscription_repository,
            student_repository,
        }
    }

    pub async fn create_subscription(&self, request: CreateSubscriptionRequest) -> Result<Subscription> {
        let subscription = request.validate(Utc::now())?;

        let student_id = subscription.student_id;
        if self.student_repository.find_by_id(student_id).await?.is_none() {
            return Err(SchoolDeskError::StudentNotFound { student_id });
        }

        let subscription = self.subscription_repository.create(subscription).await?;
        log_entity_created("subscription", subscription.id);
        Ok(subscription)
    }

    pub async fn get_subscription(&self, subscription_id: i64, student_id: i64) -> Result<Subscription> {
        self.subscription_repository
            .find_for_student(subscription_id, student_id)
            .await?
            .ok_or(SchoolDeskError::SubscriptionNotFound { subscription_id, student_id })
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<SubscriptionWithStudent>> {
        self.subscription_repository.list_with_students().await
    }
}
