//! DTOs de la API
//!
//! Payloads de entrada (con validación) y formas de respuesta.

pub mod api_response;
pub mod company_dto;
pub mod driver_dto;
pub mod vehicle_dto;
