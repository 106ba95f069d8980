use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::company::Company;
use crate::utils::serde_ext::empty_string_as_none;
use crate::utils::validation::{validate_calendar_date, validate_image_size, validate_not_blank};

// Request para guardar la empresa (POST y PUT tienen la misma semántica)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub license_number: String,

    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub address: String,

    #[serde(default)]
    #[validate(custom = "validate_calendar_date")]
    pub renewal_date: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(custom = "validate_image_size")]
    pub logo: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub website: Option<String>,
}

impl CompanyRequest {
    pub fn into_company(self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Company {
        Company {
            id: Company::singleton_id(),
            name: self.name,
            license_number: self.license_number,
            address: self.address,
            renewal_date: self.renewal_date,
            logo: self.logo,
            email: self.email,
            phone: self.phone,
            website: self.website,
            created_at,
            updated_at,
        }
    }
}
