//! Middleware del sistema
//!
//! CORS y extractores que validan la entrada antes de llegar a los handlers.

pub mod cors;
pub mod extractors;

pub use cors::*;
pub use extractors::*;
