//! Diagnóstico de la conexión al document store
//!
//! Hace ping al backend, escribe un documento de prueba en la colección
//! `diagnostics` y lo borra. Es la única ruta cuyos errores incluyen `details`.

use std::sync::Arc;
use std::time::Instant;

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::database::{Collection, DocumentStore, StoreError, StoreInfo};
use crate::models::document_id::DocumentId;
use crate::utils::errors::AppError;
use crate::utils::serde_ext::{now, timestamp};

lazy_static! {
    static ref PROCESS_START: Instant = Instant::now();
}

/// Fijar el instante de arranque (se llama desde `main`)
pub fn mark_started() {
    lazy_static::initialize(&PROCESS_START);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub insert: bool,
    pub cleanup: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(flatten)]
    pub store: StoreInfo,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub success: bool,
    pub message: String,
    pub database: String,
    pub backend: &'static str,
    pub test_results: TestResults,
    pub server_info: ServerInfo,
}

pub struct DiagnosticsController {
    store: Arc<dyn DocumentStore>,
    database_name: String,
}

impl DiagnosticsController {
    pub fn new(store: Arc<dyn DocumentStore>, database_name: &str) -> Self {
        Self {
            store,
            database_name: database_name.to_string(),
        }
    }

    pub async fn run(&self) -> Result<DiagnosticsReport, AppError> {
        let backend = self.store.backend();
        info!("🩺 Probando conexión al document store ({})", backend);

        let store_info = self
            .store
            .ping()
            .await
            .map_err(|e| self.failure("Failed to reach the document store", "ping", e))?;
        debug!("🏓 Ping OK: {:?}", store_info.version);

        let probe_id = DocumentId::generate();
        let probe = json!({
            "_id": probe_id.as_str(),
            "test": true,
            "timestamp": timestamp::format(&now()),
        });

        self.store
            .insert(Collection::Diagnostics, &probe_id, probe)
            .await
            .map_err(|e| self.failure("Insert test failed", "insert", e))?;

        let cleanup = self
            .store
            .delete(Collection::Diagnostics, &probe_id)
            .await
            .map_err(|e| self.failure("Cleanup test failed", "cleanup", e))?;

        info!("✅ Diagnóstico completado en '{}'", self.database_name);

        Ok(DiagnosticsReport {
            success: true,
            message: "Successfully connected to the document store and tested operations".to_string(),
            database: self.database_name.clone(),
            backend,
            test_results: TestResults {
                insert: true,
                cleanup,
            },
            server_info: ServerInfo {
                store: store_info,
                uptime_seconds: PROCESS_START.elapsed().as_secs(),
            },
        })
    }

    fn failure(&self, message: &str, step: &str, error: StoreError) -> AppError {
        AppError::Diagnostic {
            message: message.to_string(),
            details: json!({
                "step": step,
                "backend": self.store.backend(),
                "database": self.database_name,
                "message": error.to_string(),
            }),
        }
    }
}
