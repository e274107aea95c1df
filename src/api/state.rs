//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Use cases, behind traits
    pub services: Arc<dyn ServiceContainer>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the service container on top of the database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            config,
        ));

        Self { services, database }
    }

    /// Create application state with an injected service container.
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self { services, database }
    }
}
