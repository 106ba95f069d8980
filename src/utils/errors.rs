//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Method not allowed")]
    MethodNotAllowed { allowed: &'static [&'static str] },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Único error que devuelve detalles al cliente (ruta de diagnóstico)
    #[error("Diagnostic failure: {message}")]
    Diagnostic {
        message: String,
        details: serde_json::Value,
    },
}

/// Respuesta de error para la API - mismo sobre que las respuestas exitosas
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
            code,
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                tracing::warn!("⚠️ Validation error: {}", e);
                let mut body = ErrorResponse::new(
                    "The provided data is invalid",
                    e.to_string(),
                    "VALIDATION_ERROR",
                );
                body.details = Some(json!(e));
                (StatusCode::BAD_REQUEST, body)
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(msg.clone(), msg, "VALIDATION_ERROR"),
                )
            }

            AppError::NotFound(msg) => {
                tracing::debug!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(msg.clone(), msg, "NOT_FOUND"),
                )
            }

            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("⚠️ Payload too large: {}", msg);
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorResponse::new("Request body is too large", msg, "PAYLOAD_TOO_LARGE"),
                )
            }

            AppError::MethodNotAllowed { allowed } => {
                let allow = allowed.join(", ");
                let body = ErrorResponse::new(
                    "Method Not Allowed",
                    format!("Allowed methods: {}", allow),
                    "METHOD_NOT_ALLOWED",
                );
                let mut response = (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response();
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                return response;
            }

            AppError::Store(e) => {
                tracing::error!("❌ Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred",
                        "INTERNAL_ERROR",
                    ),
                )
            }

            AppError::Diagnostic { message, details } => {
                tracing::error!("❌ Diagnostic failure: {} ({})", message, details);
                let mut body = ErrorResponse::new(message.clone(), message, "DIAGNOSTIC_ERROR");
                body.details = Some(details);
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_is_400() {
        let response = validation_error("name", "Name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_404() {
        let response = not_found_error("Vehicle").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn oversized_body_is_413() {
        let response = AppError::PayloadTooLarge("length limit exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let response = AppError::MethodNotAllowed {
            allowed: &["GET", "POST"],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let response = AppError::Store(StoreError::Duplicate {
            collection: "vehicles",
            id: "65f1c0a2b3d4e5f6a7b8c9d0".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
