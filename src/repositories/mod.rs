//! Repositorios
//!
//! Acceso tipado a cada colección del document store.

pub mod company_repository;
pub mod document_repository;
pub mod driver_repository;
pub mod vehicle_repository;

pub use document_repository::{DocumentRepository, StoredDocument};
