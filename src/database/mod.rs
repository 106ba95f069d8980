//! Módulo de base de datos
//!
//! Document store con una colección por entidad, sobre PostgreSQL (JSONB)
//! o en memoria.

pub mod connection;
pub mod document_store;
pub mod memory_store;
pub mod postgres_store;

pub use connection::DatabaseConnection;
pub use document_store::{
    Collection, DocumentQuery, DocumentStore, StoreError, StoreInfo, StoreResult, TextSearch,
};
pub use memory_store::MemoryDocumentStore;
pub use postgres_store::PostgresDocumentStore;
