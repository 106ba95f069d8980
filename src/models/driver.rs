//! Modelo de Driver
//!
//! Documento de la colección `drivers` y su estado.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;
use crate::utils::serde_ext::timestamp;

/// Estado del conductor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
    OnLeave,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [
        DriverStatus::Active,
        DriverStatus::Inactive,
        DriverStatus::OnLeave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
            DriverStatus::OnLeave => "on_leave",
        }
    }

    /// Estado expuesto en la vista resumida: `on_leave` se reporta como `inactive`
    pub fn collapsed(&self) -> DriverStatus {
        match self {
            DriverStatus::OnLeave => DriverStatus::Inactive,
            other => *other,
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown driver status '{}'", s))
    }
}

/// Driver principal - documento de la colección `drivers`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    pub license_type: String,
    pub license_expiry_date: String,
    pub status: DriverStatus,
    pub emergency_contact: String,
    pub emergency_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Campos de texto sobre los que actúa la búsqueda de conductores
pub const DRIVER_SEARCH_FIELDS: &[&str] = &["firstName", "lastName", "email", "licenseNumber"];
