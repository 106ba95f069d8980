//! Conexión al document store
//!
//! El cliente de persistencia se construye una sola vez al arrancar, se
//! comparte entre todas las peticiones a través de `AppState` y vive hasta
//! que termina el proceso.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::{DocumentStore, MemoryDocumentStore, PostgresDocumentStore};
use crate::config::{DatabaseConfig, StorageBackend};

#[derive(Clone)]
pub struct DatabaseConnection {
    store: Arc<dyn DocumentStore>,
    database_name: String,
}

impl DatabaseConnection {
    /// Abrir la conexión según el backend configurado
    pub async fn connect(config: &DatabaseConfig, backend: StorageBackend) -> Result<Self> {
        match backend {
            StorageBackend::Postgres => {
                if let Some(url) = &config.url {
                    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(url));
                }
                let pool = config.create_pool().await?;
                let store = PostgresDocumentStore::new(pool);
                store.ensure_collections().await?;
                info!("✅ PostgreSQL conectado exitosamente");

                Ok(Self {
                    store: Arc::new(store),
                    database_name: config.name.clone(),
                })
            }
            StorageBackend::Memory => {
                warn!("⚠️ Usando document store en memoria: los datos no persisten");
                Ok(Self::in_memory(&config.name))
            }
        }
    }

    /// Conexión en memoria (tests y desarrollo local)
    pub fn in_memory(database_name: &str) -> Self {
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
            database_name: database_name.to_string(),
        }
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    if at_pos < scheme_end {
        return url.to_string();
    }

    let protocol = &url[..scheme_end + 3];
    let host = &url[at_pos + 1..];
    format!("{}***:***@{}", protocol, host)
}
