use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::document_id::DocumentId;
use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::serde_ext::{empty_string_as_none, timestamp};
use crate::utils::validation::{validate_calendar_date, validate_image_size, validate_not_blank};

// Request para crear o reemplazar un conductor
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub first_name: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub phone: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub address: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub license_number: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub license_type: String,

    #[serde(default)]
    #[validate(custom = "validate_calendar_date")]
    pub license_expiry_date: String,

    #[validate(required(message = "Driver status is required"))]
    pub status: Option<DriverStatus>,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub emergency_contact: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub emergency_phone: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(custom = "validate_image_size")]
    pub image: Option<String>,
}

impl DriverRequest {
    pub fn into_driver(
        self,
        id: DocumentId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Driver> {
        Ok(Driver {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            license_number: self.license_number,
            license_type: self.license_type,
            license_expiry_date: self.license_expiry_date,
            status: self
                .status
                .ok_or_else(|| validation_error("status", "Driver status is required"))?,
            emergency_contact: self.emergency_contact,
            emergency_phone: self.emergency_phone,
            image: self.image,
            created_at,
            updated_at,
        })
    }
}

/// Forma de la respuesta de conductor
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DriverView {
    /// Documento completo tal como se guardó
    #[default]
    Full,
    /// Nombre concatenado y estado colapsado (`on_leave` → `inactive`)
    Summary,
}

// Filtros de listado: ?status=&search=&page=&limit=&view=
#[derive(Debug, Default, Deserialize)]
pub struct DriverListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub view: DriverView,
}

// Query de las rutas de un solo conductor: ?view=
#[derive(Debug, Default, Deserialize)]
pub struct DriverViewQuery {
    #[serde(default)]
    pub view: DriverView,
}

// Vista resumida de un conductor
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_type: String,
    pub license_expiry_date: String,
    pub status: DriverStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl From<Driver> for DriverSummary {
    fn from(driver: Driver) -> Self {
        Self {
            name: driver.full_name(),
            status: driver.status.collapsed(),
            id: driver.id,
            email: driver.email,
            phone: driver.phone,
            license_number: driver.license_number,
            license_type: driver.license_type,
            license_expiry_date: driver.license_expiry_date,
            image: driver.image,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

// Response de conductor: misma forma en listados y en rutas individuales
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DriverResponse {
    Full(Driver),
    Summary(DriverSummary),
}

impl DriverResponse {
    pub fn render(driver: Driver, view: DriverView) -> Self {
        match view {
            DriverView::Full => DriverResponse::Full(driver),
            DriverView::Summary => DriverResponse::Summary(DriverSummary::from(driver)),
        }
    }
}
