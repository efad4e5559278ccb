//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod enrollment;
pub mod memory;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use repositories::{ParentRepository, StudentRepository, ClassRepository, SubscriptionRepository};
pub use enrollment::{PgEnrollmentStore, PgEnrollmentTransaction};
pub use memory::{MemoryEnrollmentStore, MemoryEnrollmentTransaction};
pub use service::DatabaseService;
