//! Registration arbiter
//!
//! Decides whether a student may join a class and consumes subscription
//! sessions. Both operations run against an [`EnrollmentTransaction`]: every
//! check reads through the same transaction and the single write happens
//! last, so a rejected request never leaves partial state behind.

use async_trait::async_trait;
use tracing::debug;
use crate::models::{ClassRegistration, ClassSession, RegisteredSlot, Subscription};
use crate::scheduling::days::Weekday;
use crate::scheduling::time_slot;
use crate::utils::errors::{SchoolDeskError, Result};

/// Store operations the arbiter needs, scoped to one transaction.
///
/// Implementations must make the reads of one transaction consistent with
/// its final write: concurrent transactions touching the same class or the
/// same student must not both pass the checks and both commit.
#[async_trait]
pub trait EnrollmentTransaction: Send {
    async fn find_class_by_id(&mut self, class_id: i64) -> Result<Option<ClassSession>>;

    /// Serialize concurrent gates for the same student; stores that know
    /// their students fail with [`SchoolDeskError::StudentNotFound`]
    async fn lock_student(&mut self, student_id: i64) -> Result<()>;

    async fn find_registration(&mut self, class_id: i64, student_id: i64) -> Result<Option<ClassRegistration>>;

    async fn count_registrations(&mut self, class_id: i64) -> Result<i64>;

    /// Slots of the student's classes meeting on at least one of `days`
    async fn find_registrations_for_student_on_days(
        &mut self,
        student_id: i64,
        days: &[Weekday],
    ) -> Result<Vec<RegisteredSlot>>;

    /// Fails with [`SchoolDeskError::AlreadyRegistered`] on a duplicate pair
    async fn create_registration(&mut self, class_id: i64, student_id: i64) -> Result<ClassRegistration>;

    async fn find_subscription(&mut self, subscription_id: i64, student_id: i64) -> Result<Option<Subscription>>;

    async fn increment_used_sessions(&mut self, subscription_id: i64, student_id: i64) -> Result<Subscription>;

    async fn commit(self) -> Result<()>;
}

/// Opens enrollment transactions
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    type Transaction: EnrollmentTransaction;

    async fn begin(&self) -> Result<Self::Transaction>;
}

/// Register a student for a class.
///
/// Checks run in a fixed order and stop at the first failure: the class
/// exists, the student is not already registered, the class has a free seat,
/// and no class the student attends on a shared weekday overlaps the target's
/// time slot. Only then is the registration written.
pub async fn register_student<T>(tx: &mut T, class_id: i64, student_id: i64) -> Result<ClassRegistration>
where
    T: EnrollmentTransaction + ?Sized,
{
    let class = tx
        .find_class_by_id(class_id)
        .await?
        .ok_or(SchoolDeskError::ClassNotFound { class_id })?;

    tx.lock_student(student_id).await?;

    if tx.find_registration(class_id, student_id).await?.is_some() {
        return Err(SchoolDeskError::AlreadyRegistered { class_id, student_id });
    }

    let registered = tx.count_registrations(class_id).await?;
    if registered >= i64::from(class.max_students) {
        return Err(SchoolDeskError::ClassFull { class_id, max_students: class.max_students });
    }

    let same_day_slots = tx
        .find_registrations_for_student_on_days(student_id, &class.days_of_week)
        .await?;

    if let Some(conflict) = find_conflict(&class.time_slot, &same_day_slots)? {
        debug!(
            class_id = class_id,
            student_id = student_id,
            conflicting_class_id = conflict.class_id,
            conflicting_slot = %conflict.time_slot,
            "Schedule conflict detected"
        );
        return Err(SchoolDeskError::ScheduleConflict { class_id, student_id });
    }

    tx.create_registration(class_id, student_id).await
}

/// First slot overlapping `target_slot`, if any.
///
/// Callers pass only slots of classes sharing a weekday with the target;
/// since a class has one slot for all its days, a slot overlap on a shared
/// day is a real collision.
pub fn find_conflict<'a>(target_slot: &str, slots: &'a [RegisteredSlot]) -> Result<Option<&'a RegisteredSlot>> {
    for slot in slots {
        if time_slot::overlaps(&slot.time_slot, target_slot)? {
            return Ok(Some(slot));
        }
    }
    Ok(None)
}

/// Consume one session of a student's subscription
pub async fn mark_session_used<T>(tx: &mut T, subscription_id: i64, student_id: i64) -> Result<Subscription>
where
    T: EnrollmentTransaction + ?Sized,
{
    let subscription = tx
        .find_subscription(subscription_id, student_id)
        .await?
        .ok_or(SchoolDeskError::SubscriptionNotFound { subscription_id, student_id })?;

    if subscription.is_exhausted() {
        return Err(SchoolDeskError::SessionsExhausted {
            subscription_id,
            total_sessions: subscription.total_sessions,
        });
    }

    tx.increment_used_sessions(subscription_id, student_id).await
}
