//! Error handling for SchoolDesk
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for SchoolDesk application
#[derive(Error, Debug)]
pub enum SchoolDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Invalid time slot format: {value}")]
    MalformedSlot { value: String },

    #[error("Invalid day query: {value}")]
    InvalidDayQuery { value: String },

    #[error("dayOfWeek must contain at least one valid day")]
    EmptyDaySelection,

    #[error("Class not found: {class_id}")]
    ClassNotFound { class_id: i64 },

    #[error("Student {student_id} is already registered for class {class_id}")]
    AlreadyRegistered { class_id: i64, student_id: i64 },

    #[error("Class {class_id} is full ({max_students} students)")]
    ClassFull { class_id: i64, max_students: i32 },

    #[error("Student {student_id} has a schedule conflict with class {class_id}")]
    ScheduleConflict { class_id: i64, student_id: i64 },

    #[error("Subscription {subscription_id} not found for student {student_id}")]
    SubscriptionNotFound { subscription_id: i64, student_id: i64 },

    #[error("Subscription {subscription_id} has used all {total_sessions} sessions")]
    SessionsExhausted { subscription_id: i64, total_sessions: i32 },

    #[error("Parent not found: {parent_id}")]
    ParentNotFound { parent_id: i64 },

    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for SchoolDesk operations
pub type Result<T> = std::result::Result<T, SchoolDeskError>;

impl SchoolDeskError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SchoolDeskError::Database(_) => true,
            SchoolDeskError::Migration(_) => false,
            SchoolDeskError::Config(_) => false,
            SchoolDeskError::ConfigLoad(_) => false,
            SchoolDeskError::Io(_) => true,
            SchoolDeskError::Serialization(_) => false,
            // Business rule failures never heal on retry
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SchoolDeskError::Database(_) => ErrorSeverity::Critical,
            SchoolDeskError::Migration(_) => ErrorSeverity::Critical,
            SchoolDeskError::Config(_) => ErrorSeverity::Critical,
            SchoolDeskError::ConfigLoad(_) => ErrorSeverity::Critical,
            SchoolDeskError::Io(_) | SchoolDeskError::Serialization(_) => ErrorSeverity::Error,
            SchoolDeskError::ClassFull { .. }
            | SchoolDeskError::ScheduleConflict { .. }
            | SchoolDeskError::AlreadyRegistered { .. }
            | SchoolDeskError::SessionsExhausted { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Info,
        }
    }

    /// HTTP status this error surfaces as
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchoolDeskError::ClassNotFound { .. }
            | SchoolDeskError::SubscriptionNotFound { .. }
            | SchoolDeskError::ParentNotFound { .. }
            | SchoolDeskError::StudentNotFound { .. } => StatusCode::NOT_FOUND,
            SchoolDeskError::MalformedSlot { .. }
            | SchoolDeskError::InvalidDayQuery { .. }
            | SchoolDeskError::EmptyDaySelection
            | SchoolDeskError::AlreadyRegistered { .. }
            | SchoolDeskError::ClassFull { .. }
            | SchoolDeskError::ScheduleConflict { .. }
            | SchoolDeskError::SessionsExhausted { .. }
            | SchoolDeskError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            SchoolDeskError::Database(_) => "DATABASE_ERROR",
            SchoolDeskError::Migration(_) => "MIGRATION_ERROR",
            SchoolDeskError::Config(_) | SchoolDeskError::ConfigLoad(_) => "CONFIG_ERROR",
            SchoolDeskError::MalformedSlot { .. } => "MALFORMED_SLOT",
            SchoolDeskError::InvalidDayQuery { .. } => "INVALID_DAY_QUERY",
            SchoolDeskError::EmptyDaySelection => "EMPTY_DAY_SELECTION",
            SchoolDeskError::ClassNotFound { .. } => "CLASS_NOT_FOUND",
            SchoolDeskError::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            SchoolDeskError::ClassFull { .. } => "CLASS_FULL",
            SchoolDeskError::ScheduleConflict { .. } => "SCHEDULE_CONFLICT",
            SchoolDeskError::SubscriptionNotFound { .. } => "SUBSCRIPTION_NOT_FOUND",
            SchoolDeskError::SessionsExhausted { .. } => "SESSIONS_EXHAUSTED",
            SchoolDeskError::ParentNotFound { .. } => "PARENT_NOT_FOUND",
            SchoolDeskError::StudentNotFound { .. } => "STUDENT_NOT_FOUND",
            SchoolDeskError::Serialization(_) => "SERIALIZATION_ERROR",
            SchoolDeskError::Io(_) => "IO_ERROR",
            SchoolDeskError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        assert_eq!(SchoolDeskError::ClassNotFound { class_id: 1 }.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            SchoolDeskError::SubscriptionNotFound { subscription_id: 1, student_id: 2 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(SchoolDeskError::StudentNotFound { student_id: 3 }.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_business_rule_kinds_map_to_400() {
        let errors = vec![
            SchoolDeskError::MalformedSlot { value: "25:00".to_string() },
            SchoolDeskError::InvalidDayQuery { value: "HOLIDAY".to_string() },
            SchoolDeskError::EmptyDaySelection,
            SchoolDeskError::AlreadyRegistered { class_id: 1, student_id: 2 },
            SchoolDeskError::ClassFull { class_id: 1, max_students: 1 },
            SchoolDeskError::ScheduleConflict { class_id: 1, student_id: 2 },
            SchoolDeskError::SessionsExhausted { subscription_id: 1, total_sessions: 2 },
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST, "{}", error);
            assert!(!error.is_recoverable());
        }
    }

    #[test]
    fn test_error_messages_carry_context() {
        let error = SchoolDeskError::ScheduleConflict { class_id: 7, student_id: 42 };
        let message = error.to_string();
        assert!(message.contains("42"));
        assert!(message.contains('7'));

        let error = SchoolDeskError::MalformedSlot { value: "8-10".to_string() };
        assert!(error.to_string().contains("8-10"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(SchoolDeskError::Config("x".to_string()).severity(), ErrorSeverity::Critical);
        assert_eq!(SchoolDeskError::ClassFull { class_id: 1, max_students: 1 }.severity(), ErrorSeverity::Warning);
        assert_eq!(SchoolDeskError::InvalidInput("x".to_string()).severity(), ErrorSeverity::Info);
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }
}
