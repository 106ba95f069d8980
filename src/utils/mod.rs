//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y serialización de campos comunes.

pub mod errors;
pub mod serde_ext;
pub mod validation;
