//! In-memory enrollment store
//!
//! Keeps classes, registrations and subscriptions in memory for tests and
//! local runs. A transaction holds the store lock for its whole lifetime and
//! works on a copy of the state; `commit` swaps the copy in, dropping the
//! transaction discards it.

use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use crate::models::{ClassRegistration, ClassSession, NewClassSession, NewSubscription, RegisteredSlot, Subscription};
use crate::scheduling::arbiter::{EnrollmentStore, EnrollmentTransaction};
use crate::scheduling::days::{shares_any_day, Weekday};
use crate::utils::errors::{SchoolDeskError, Result};

#[derive(Debug, Clone)]
struct MemoryState {
    classes: BTreeMap<i64, ClassSession>,
    registrations: Vec<ClassRegistration>,
    subscriptions: BTreeMap<i64, Subscription>,
    next_class_id: i64,
    next_registration_id: i64,
    next_subscription_id: i64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            classes: BTreeMap::new(),
            registrations: Vec::new(),
            subscriptions: BTreeMap::new(),
            next_class_id: 1,
            next_registration_id: 1,
            next_subscription_id: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryEnrollmentStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; the id is assigned by the store
    pub async fn insert_class(&self, class: NewClassSession) -> ClassSession {
        let mut state = self.state.lock().await;
        let id = state.next_class_id;
        state.next_class_id += 1;

        let class = ClassSession {
            id,
            subject: class.subject,
            teacher_name: class.teacher_name,
            max_students: class.max_students,
            time_slot: class.time_slot,
            days_of_week: class.days_of_week,
            created_at: Utc::now(),
        };
        state.classes.insert(id, class.clone());
        class
    }

    /// Add a subscription with no sessions used
    pub async fn insert_subscription(&self, subscription: NewSubscription) -> Subscription {
        let mut state = self.state.lock().await;
        let id = state.next_subscription_id;
        state.next_subscription_id += 1;

        let subscription = Subscription {
            id,
            student_id: subscription.student_id,
            package_name: subscription.package_name.as_str().to_string(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            total_sessions: subscription.total_sessions,
            used_sessions: 0,
            created_at: Utc::now(),
        };
        state.subscriptions.insert(id, subscription.clone());
        subscription
    }

    /// Committed registrations, oldest first
    pub async fn registrations(&self) -> Vec<ClassRegistration> {
        self.state.lock().await.registrations.clone()
    }

    pub async fn registrations_for_class(&self, class_id: i64) -> Vec<ClassRegistration> {
        self.state
            .lock()
            .await
            .registrations
            .iter()
            .filter(|r| r.class_id == class_id)
            .cloned()
            .collect()
    }

    pub async fn subscription(&self, subscription_id: i64) -> Option<Subscription> {
        self.state.lock().await.subscriptions.get(&subscription_id).cloned()
    }
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    type Transaction = MemoryEnrollmentTransaction;

    async fn begin(&self) -> Result<Self::Transaction> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(MemoryEnrollmentTransaction { guard, working })
    }
}

pub struct MemoryEnrollmentTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl EnrollmentTransaction for MemoryEnrollmentTransaction {
    async fn find_class_by_id(&mut self, class_id: i64) -> Result<Option<ClassSession>> {
        Ok(self.working.classes.get(&class_id).cloned())
    }

    async fn lock_student(&mut self, _student_id: i64) -> Result<()> {
        // The store lock already serializes every transaction
        Ok(())
    }

    async fn find_registration(&mut self, class_id: i64, student_id: i64) -> Result<Option<ClassRegistration>> {
        Ok(self
            .working
            .registrations
            .iter()
            .find(|r| r.class_id == class_id && r.student_id == student_id)
            .cloned())
    }

    async fn count_registrations(&mut self, class_id: i64) -> Result<i64> {
        let count = self.working.registrations.iter().filter(|r| r.class_id == class_id).count();
        Ok(count as i64)
    }

    async fn find_registrations_for_student_on_days(
        &mut self,
        student_id: i64,
        days: &[Weekday],
    ) -> Result<Vec<RegisteredSlot>> {
        let classes = &self.working.classes;
        Ok(self
            .working
            .registrations
            .iter()
            .filter(|r| r.student_id == student_id)
            .filter_map(|r| classes.get(&r.class_id))
            .filter(|class| shares_any_day(&class.days_of_week, days))
            .map(|class| RegisteredSlot { class_id: class.id, time_slot: class.time_slot.clone() })
            .collect())
    }

    async fn create_registration(&mut self, class_id: i64, student_id: i64) -> Result<ClassRegistration> {
        if self.find_registration(class_id, student_id).await?.is_some() {
            return Err(SchoolDeskError::AlreadyRegistered { class_id, student_id });
        }

        let registration = ClassRegistration {
            id: self.working.next_registration_id,
            class_id,
            student_id,
            registered_at: Utc::now(),
        };
        self.working.next_registration_id += 1;
        self.working.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn find_subscription(&mut self, subscription_id: i64, student_id: i64) -> Result<Option<Subscription>> {
        Ok(self
            .working
            .subscriptions
            .get(&subscription_id)
            .filter(|s| s.student_id == student_id)
            .cloned())
    }

    async fn increment_used_sessions(&mut self, subscription_id: i64, student_id: i64) -> Result<Subscription> {
        let subscription = self
            .working
            .subscriptions
            .get_mut(&subscription_id)
            .filter(|s| s.student_id == student_id)
            .ok_or(SchoolDeskError::SubscriptionNotFound { subscription_id, student_id })?;

        if subscription.is_exhausted() {
            return Err(SchoolDeskError::SessionsExhausted {
                subscription_id,
                total_sessions: subscription.total_sessions,
            });
        }

        subscription.used_sessions += 1;
        Ok(subscription.clone())
    }

    async fn commit(self) -> Result<()> {
        let MemoryEnrollmentTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(days: Vec<Weekday>, time_slot: &str) -> NewClassSession {
        NewClassSession {
            subject: "Art".to_string(),
            teacher_name: "Ms. Lee".to_string(),
            max_students: 5,
            time_slot: time_slot.to_string(),
            days_of_week: days,
        }
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = MemoryEnrollmentStore::new();
        let class = store.insert_class(class(vec![Weekday::Monday], "09:00-10:00")).await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.create_registration(class.id, 1).await.unwrap();
            assert_eq!(tx.count_registrations(class.id).await.unwrap(), 1);
        }

        assert!(store.registrations().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = MemoryEnrollmentStore::new();
        let class = store.insert_class(class(vec![Weekday::Monday], "09:00-10:00")).await;

        let mut tx = store.begin().await.unwrap();
        tx.create_registration(class.id, 1).await.unwrap();
        tx.commit().await.unwrap();

        let registrations = store.registrations_for_class(class.id).await;
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].student_id, 1);
    }

    #[tokio::test]
    async fn test_same_day_lookup_ignores_other_days() {
        let store = MemoryEnrollmentStore::new();
        let monday = store.insert_class(class(vec![Weekday::Monday], "09:00-10:00")).await;
        let friday = store.insert_class(class(vec![Weekday::Friday], "09:00-10:00")).await;

        let mut tx = store.begin().await.unwrap();
        tx.create_registration(monday.id, 7).await.unwrap();
        tx.create_registration(friday.id, 7).await.unwrap();

        let slots = tx
            .find_registrations_for_student_on_days(7, &[Weekday::Friday, Weekday::Saturday])
            .await
            .unwrap();
        assert_eq!(slots, vec![RegisteredSlot { class_id: friday.id, time_slot: "09:00-10:00".to_string() }]);
    }
}
