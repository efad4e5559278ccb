//! PostgreSQL enrollment store
//!
//! Runs the registration and session-consumption gates inside one database
//! transaction. The target class row and the student row are locked with
//! `FOR UPDATE` so that concurrent registrations for the same class or by the
//! same student queue behind each other instead of both passing the checks.
//! The unique `(class_id, student_id)` constraint backs up the duplicate check.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use crate::database::repositories::class::{day_symbols, CLASS_COLUMNS};
use crate::database::repositories::subscription::SUBSCRIPTION_COLUMNS;
use crate::models::{ClassRegistration, ClassRow, ClassSession, RegisteredSlot, Subscription};
use crate::scheduling::arbiter::{EnrollmentStore, EnrollmentTransaction};
use crate::scheduling::days::Weekday;
use crate::utils::errors::{SchoolDeskError, Result};

#[derive(Clone, Debug)]
pub struct PgEnrollmentStore {
    pool: PgPool,
}

impl PgEnrollmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentStore for PgEnrollmentStore {
    type Transaction = PgEnrollmentTransaction;

    async fn begin(&self) -> Result<Self::Transaction> {
        let tx = self.pool.begin().await?;
        Ok(PgEnrollmentTransaction { tx })
    }
}

/// An open enrollment transaction; dropped without commit it rolls back
pub struct PgEnrollmentTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl EnrollmentTransaction for PgEnrollmentTransaction {
    async fn find_class_by_id(&mut self, class_id: i64) -> Result<Option<ClassSession>> {
        let query = format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 FOR UPDATE");

        let row = sqlx::query_as::<_, ClassRow>(&query)
            .bind(class_id)
            .fetch_optional(&mut *self.tx)
            .await?;

        row.map(ClassSession::try_from).transpose()
    }

    async fn lock_student(&mut self, student_id: i64) -> Result<()> {
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM students WHERE id = $1 FOR UPDATE")
            .bind(student_id)
            .fetch_optional(&mut *self.tx)
            .await?;

        locked
            .map(|_| ())
            .ok_or(SchoolDeskError::StudentNotFound { student_id })
    }

    async fn find_registration(&mut self, class_id: i64, student_id: i64) -> Result<Option<ClassRegistration>> {
        let registration = sqlx::query_as::<_, ClassRegistration>(
            "SELECT id, class_id, student_id, registered_at FROM class_registrations WHERE class_id = $1 AND student_id = $2"
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(registration)
    }

    async fn count_registrations(&mut self, class_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM class_registrations WHERE class_id = $1"
        )
        .bind(class_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count.0)
    }

    async fn find_registrations_for_student_on_days(
        &mut self,
        student_id: i64,
        days: &[Weekday],
    ) -> Result<Vec<RegisteredSlot>> {
        let slots = sqlx::query_as::<_, RegisteredSlot>(
            r#"
            SELECT c.id AS class_id, c.time_slot
            FROM class_registrations cr
            INNER JOIN classes c ON c.id = cr.class_id
            WHERE cr.student_id = $1 AND c.days_of_week && $2::text[]
            ORDER BY cr.registered_at ASC
            "#
        )
        .bind(student_id)
        .bind(day_symbols(days))
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(slots)
    }

    async fn create_registration(&mut self, class_id: i64, student_id: i64) -> Result<ClassRegistration> {
        sqlx::query_as::<_, ClassRegistration>(
            r#"
            INSERT INTO class_registrations (class_id, student_id, registered_at)
            VALUES ($1, $2, NOW())
            RETURNING id, class_id, student_id, registered_at
            "#
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                SchoolDeskError::AlreadyRegistered { class_id, student_id }
            }
            other => SchoolDeskError::Database(other),
        })
    }

    async fn find_subscription(&mut self, subscription_id: i64, student_id: i64) -> Result<Option<Subscription>> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1 AND student_id = $2 FOR UPDATE"
        );

        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(subscription_id)
            .bind(student_id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(subscription)
    }

    async fn increment_used_sessions(&mut self, subscription_id: i64, student_id: i64) -> Result<Subscription> {
        let query = format!(
            r#"
            UPDATE subscriptions
            SET used_sessions = used_sessions + 1
            WHERE id = $1 AND student_id = $2 AND used_sessions < total_sessions
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Subscription>(&query)
            .bind(subscription_id)
            .bind(student_id)
            .fetch_optional(&mut *self.tx)
            .await?;

        match updated {
            Some(subscription) => Ok(subscription),
            None => match self.find_subscription(subscription_id, student_id).await? {
                Some(subscription) => Err(SchoolDeskError::SessionsExhausted {
                    subscription_id,
                    total_sessions: subscription.total_sessions,
                }),
                None => Err(SchoolDeskError::SubscriptionNotFound { subscription_id, student_id }),
            },
        }
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
