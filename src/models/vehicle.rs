//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como se guarda en la colección
//! `vehicles` y los enums de tipo y estado.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;
use crate::utils::serde_ext::timestamp;

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Truck,
    Bus,
    Van,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Truck, VehicleType::Bus, VehicleType::Van];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Truck => "Truck",
            VehicleType::Bus => "Bus",
            VehicleType::Van => "Van",
        }
    }
}

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Active,
        VehicleStatus::Maintenance,
        VehicleStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown vehicle status '{}'", s))
    }
}

/// Vehicle principal - documento de la colección `vehicles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub location: String,
    pub status: VehicleStatus,
    pub mileage: f64,
    pub registration_date: String,
    pub purchase_date: String,
    pub license_expiry_date: String,
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    // driverId/driverName son informativos: nunca se cruzan con `drivers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Campos de texto sobre los que actúa la búsqueda de vehículos
pub const VEHICLE_SEARCH_FIELDS: &[&str] = &["licensePlate", "type", "make", "model"];
