//! Database service layer
//!
//! Bundles the repositories and the enrollment store over one pool

use crate::database::{DatabasePool, ParentRepository, StudentRepository, ClassRepository, SubscriptionRepository};
use crate::database::enrollment::PgEnrollmentStore;
use crate::database::connection::health_check;
use crate::utils::errors::SchoolDeskError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub parents: ParentRepository,
    pub students: StudentRepository,
    pub classes: ClassRepository,
    pub subscriptions: SubscriptionRepository,
    pub enrollment: PgEnrollmentStore,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            parents: ParentRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
            classes: ClassRepository::new(pool.clone()),
            subscriptions: SubscriptionRepository::new(pool.clone()),
            enrollment: PgEnrollmentStore::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Ping the database
    pub async fn health_check(&self) -> Result<(), SchoolDeskError> {
        health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_database_service_creation_is_lazy() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/schooldesk_test")
            .unwrap();
        let service = DatabaseService::new(pool);
        assert_eq!(service.pool().size(), 0);
    }
}
