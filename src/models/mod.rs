//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod parent;
pub mod student;
pub mod class;
pub mod subscription;

// Re-export commonly used models
pub use parent::{Parent, CreateParentRequest, UpdateParentRequest};
pub use student::{Student, StudentDetails, Gender, CreateStudentRequest, UpdateStudentRequest, NewStudent};
pub use class::{ClassSession, ClassRow, ClassRegistration, RegisteredSlot, DaySelection, CreateClassRequest, NewClassSession, ClassQuery};
pub use subscription::{Subscription, SubscriptionWithStudent, PackageName, CreateSubscriptionRequest, NewSubscription, StudentRef};
