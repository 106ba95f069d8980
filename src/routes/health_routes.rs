use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use super::method_not_allowed;
use crate::controllers::diagnostics_controller::{DiagnosticsController, DiagnosticsReport};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::serde_ext::{now, timestamp};

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed(&["GET"])))
        .route("/test-db", get(test_db).fallback(method_not_allowed(&["GET"])))
}

/// Liveness simple, no toca la base de datos
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": timestamp::format(&now()),
    }))
}

async fn test_db(State(state): State<AppState>) -> Result<Json<DiagnosticsReport>, AppError> {
    let controller = DiagnosticsController::new(state.store(), state.db.database_name());
    Ok(Json(controller.run().await?))
}
