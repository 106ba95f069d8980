//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::{DatabaseConnection, DocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: EnvironmentConfig) -> Self {
        Self { db, config }
    }

    /// Cliente de persistencia compartido
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.db.store()
    }
}
