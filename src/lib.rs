//! Fleet management API
//!
//! Servicio CRUD de vehículos, conductores y la empresa (singleton) sobre un
//! document store. Expuesto como librería para que los tests de integración
//! construyan el router completo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
