//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod parent;
pub mod student;
pub mod class;
pub mod subscription;

// Re-export repositories
pub use parent::ParentRepository;
pub use student::StudentRepository;
pub use class::ClassRepository;
pub use subscription::SubscriptionRepository;
