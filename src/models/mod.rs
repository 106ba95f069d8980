//! Modelos del sistema
//!
//! Este módulo contiene los documentos tal como se guardan en cada colección
//! del document store.

pub mod company;
pub mod document_id;
pub mod driver;
pub mod vehicle;

pub use document_id::DocumentId;
