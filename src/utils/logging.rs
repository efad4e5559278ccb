//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the SchoolDesk application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{SchoolDeskError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as the process logs.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| SchoolDeskError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let guard = match config.directory.as_deref() {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
                .try_init()
                .map_err(|e| SchoolDeskError::Config(format!("Logging already initialized: {}", e)))?;

            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| SchoolDeskError::Config(format!("Logging already initialized: {}", e)))?;

            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a class registration decision
pub fn log_registration(class_id: i64, student_id: i64, rejection: Option<&SchoolDeskError>) {
    match rejection {
        None => info!(
            class_id = class_id,
            student_id = student_id,
            "Student registered for class"
        ),
        Some(e) => warn!(
            class_id = class_id,
            student_id = student_id,
            reason = e.code(),
            error = %e,
            "Class registration rejected"
        ),
    }
}

/// Log a subscription session being consumed
pub fn log_session_used(subscription_id: i64, student_id: i64, used_sessions: i32, total_sessions: i32) {
    info!(
        subscription_id = subscription_id,
        student_id = student_id,
        used_sessions = used_sessions,
        total_sessions = total_sessions,
        "Subscription session marked as used"
    );
}

/// Log entity creation
pub fn log_entity_created(entity: &str, id: i64) {
    info!(entity = entity, id = id, "Entity created");
}
