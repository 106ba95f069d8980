//! Utilidades de validación
//!
//! Funciones helper usadas por las derivaciones de `validator` en los
//! payloads de entrada y por los controladores.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate};
use validator::ValidationError;

/// Tamaño máximo de una imagen decodificada (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Validar que un string no esté vacío (ni sólo espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}

/// Validar fecha en formato YYYY-MM-DD o RFC3339
pub fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;

    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok();
    if !parsed {
        let mut error = ValidationError::new("date");
        error.message = Some("Expected a YYYY-MM-DD or RFC3339 date".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Longitud en bytes del payload base64 de un data-URI una vez decodificado.
///
/// Todo lo anterior a la primera coma es la cabecera `data:<mime>;base64`;
/// sin coma, el string completo se considera el payload.
pub fn decoded_image_len(data_uri: &str) -> Result<usize, base64::DecodeError> {
    let payload = match data_uri.split_once(',') {
        Some((_, payload)) => payload,
        None => data_uri,
    };
    STANDARD.decode(payload.trim()).map(|bytes| bytes.len())
}

/// Validar el tamaño de una imagen embebida como data-URI (máximo 5MB)
pub fn validate_image_size(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    match decoded_image_len(value) {
        Ok(len) if len <= MAX_IMAGE_BYTES => Ok(()),
        Ok(len) => {
            let mut error = ValidationError::new("image_size");
            error.message = Some("Image size must be less than 5MB".into());
            error.add_param("max".into(), &MAX_IMAGE_BYTES);
            error.add_param("actual".into(), &len);
            Err(error)
        }
        Err(_) => {
            let mut error = ValidationError::new("image_encoding");
            error.message = Some("Image must be a base64 data URI".into());
            Err(error)
        }
    }
}
