//! SchoolDesk
//!
//! A REST service for school administration: parents, students, classes and
//! prepaid session subscriptions. Its core is class scheduling: time slot
//! normalization, overlap detection, weekday queries and the registration
//! arbiter that admits a student to a class only when it has room and fits
//! the student's week.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod http;
pub mod middleware;
pub mod models;
pub mod scheduling;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{SchoolDeskError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use http::{create_router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
