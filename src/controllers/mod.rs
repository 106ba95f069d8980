//! Controladores: lógica de negocio entre las rutas y los repositorios

pub mod company_controller;
pub mod diagnostics_controller;
pub mod driver_controller;
pub mod vehicle_controller;
