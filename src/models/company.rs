//! Modelo de Company
//!
//! La empresa es una entidad singleton: existe como mucho un documento en la
//! colección `company`, guardado bajo un identificador fijo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;
use crate::utils::serde_ext::timestamp;

/// Identificador fijo del documento de empresa
pub const COMPANY_DOCUMENT_ID: &str = "000000000000000000000001";

/// Company principal - documento único de la colección `company`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub license_number: String,
    pub address: String,
    pub renewal_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn singleton_id() -> DocumentId {
        DocumentId::well_known(COMPANY_DOCUMENT_ID)
    }
}
