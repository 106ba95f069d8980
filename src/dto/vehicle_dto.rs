use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::document_id::DocumentId;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::serde_ext::empty_string_as_none;
use crate::utils::validation::{validate_calendar_date, validate_image_size, validate_not_blank};

// Request para crear o reemplazar un vehículo.
// PUT reemplaza el documento completo, así que ambos usan el mismo payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[serde(rename = "type")]
    #[validate(required(message = "Vehicle type is required"))]
    pub vehicle_type: Option<VehicleType>,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub make: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub model: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub location: String,

    #[validate(required(message = "Vehicle status is required"))]
    pub status: Option<VehicleStatus>,

    #[validate(required(message = "Mileage is required"), range(min = 0.0))]
    pub mileage: Option<f64>,

    #[serde(default)]
    #[validate(custom = "validate_calendar_date")]
    pub registration_date: String,

    #[serde(default)]
    #[validate(custom = "validate_calendar_date")]
    pub purchase_date: String,

    #[serde(default)]
    #[validate(custom = "validate_calendar_date")]
    pub license_expiry_date: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub license_plate: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(custom = "validate_image_size")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub driver_id: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub driver_name: Option<String>,
}

impl VehicleRequest {
    /// Construir el documento a guardar (el payload ya fue validado)
    pub fn into_vehicle(
        self,
        id: DocumentId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Vehicle> {
        Ok(Vehicle {
            id,
            vehicle_type: self
                .vehicle_type
                .ok_or_else(|| validation_error("type", "Vehicle type is required"))?,
            make: self.make,
            model: self.model,
            location: self.location,
            status: self
                .status
                .ok_or_else(|| validation_error("status", "Vehicle status is required"))?,
            mileage: self
                .mileage
                .ok_or_else(|| validation_error("mileage", "Mileage is required"))?,
            registration_date: self.registration_date,
            purchase_date: self.purchase_date,
            license_expiry_date: self.license_expiry_date,
            license_plate: self.license_plate,
            image: self.image,
            driver_id: self.driver_id,
            driver_name: self.driver_name,
            created_at,
            updated_at,
        })
    }
}

// Filtros de listado: ?status=&search=&page=&limit=
#[derive(Debug, Default, Deserialize)]
pub struct VehicleListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

// Contadores del tablero de vehículos
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatsResponse {
    pub total: u64,
    pub active: u64,
    pub maintenance: u64,
    pub inactive: u64,
    pub by_type: BTreeMap<&'static str, u64>,
}
