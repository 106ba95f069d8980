//! Router HTTP de la API
//!
//! Todas las rutas cuelgan de `/api`. Los verbos no soportados en una ruta
//! conocida responden 405 con la cabecera `Allow`; las rutas desconocidas
//! responden 404 con el sobre de error común.

pub mod company_routes;
pub mod driver_routes;
pub mod health_routes;
pub mod vehicle_routes;

use std::future::{ready, Ready};

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Uri},
    response::IntoResponse,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Cabecera con el total de registros de un listado (antes de paginar)
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    let cors = cors_layer(&state.config);

    let api = Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/company", company_routes::create_company_router())
        .merge(health_routes::create_health_router());

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Handler de fallback por método: 405 con los verbos permitidos
pub(crate) fn method_not_allowed(
    allowed: &'static [&'static str],
) -> impl FnOnce() -> Ready<AppError> + Clone + Send + Sync + 'static {
    move || ready(AppError::MethodNotAllowed { allowed })
}

pub(crate) fn with_total_count(total: u64, body: impl IntoResponse) -> impl IntoResponse {
    ([(TOTAL_COUNT_HEADER, total.to_string())], body)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route {} not found", uri.path()))
}
