//! Application state for the HTTP server.

use std::sync::Arc;
use crate::database::DatabaseService;
use crate::services::ServiceFactory;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseService,
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    pub fn new(database: DatabaseService) -> Self {
        let services = Arc::new(ServiceFactory::new(&database));
        Self { database, services }
    }
}
