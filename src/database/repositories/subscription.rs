//! Subscription repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::subscription::{Subscription, SubscriptionWithStudent, NewSubscription};
use crate::utils::errors::SchoolDeskError;

pub(crate) const SUBSCRIPTION_COLUMNS: &str =
    "id, student_id, package_name, start_date, end_date, total_sessions, used_sessions, created_at";

#[derive(Clone, Debug)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new subscription with no sessions used
    pub async fn create(&self, subscription: NewSubscription) -> Result<Subscription, SchoolDeskError> {
        let query = format!(
            r#"
            INSERT INTO subscriptions (student_id, package_name, start_date, end_date, total_sessions, used_sessions, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6)
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );

        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(subscription.student_id)
            .bind(subscription.package_name.as_str())
            .bind(subscription.start_date)
            .bind(subscription.end_date)
            .bind(subscription.total_sessions)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(subscription)
    }

    /// Find a subscription owned by a student
    pub async fn find_for_student(&self, id: i64, student_id: i64) -> Result<Option<Subscription>, SchoolDeskError> {
        let query = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1 AND student_id = $2");

        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(subscription)
    }

    /// List subscriptions with the owning student's name
    pub async fn list_with_students(&self) -> Result<Vec<SubscriptionWithStudent>, SchoolDeskError> {
        let subscriptions = sqlx::query_as::<_, SubscriptionWithStudent>(
            r#"
            SELECT sub.id, sub.student_id, sub.package_name, sub.start_date, sub.end_date,
                   sub.total_sessions, sub.used_sessions, sub.created_at, s.name AS student_name
            FROM subscriptions sub
            INNER JOIN students s ON s.id = sub.student_id
            ORDER BY sub.id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }
}
