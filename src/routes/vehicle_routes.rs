use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::{method_not_allowed, with_total_count};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{VehicleListQuery, VehicleRequest, VehicleStatsResponse};
use crate::middleware::{JsonBody, QueryParams, ValidId};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_vehicles)
                .post(create_vehicle)
                .fallback(method_not_allowed(&["GET", "POST"])),
        )
        .route(
            "/stats",
            get(vehicle_stats).fallback(method_not_allowed(&["GET"])),
        )
        .route(
            "/:id",
            get(get_vehicle)
                .put(update_vehicle)
                .delete(delete_vehicle)
                .fallback(method_not_allowed(&["GET", "PUT", "DELETE"])),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    QueryParams(filters): QueryParams<VehicleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = VehicleController::new(state.store());
    let listing = controller.list(filters).await?;
    Ok(with_total_count(listing.total, Json(listing.items)))
}

async fn create_vehicle(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<VehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(state.store());
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn vehicle_stats(
    State(state): State<AppState>,
) -> Result<Json<VehicleStatsResponse>, AppError> {
    let controller = VehicleController::new(state.store());
    Ok(Json(controller.stats().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.store());
    Ok(Json(controller.get_by_id(&id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(request): JsonBody<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.store());
    Ok(Json(controller.update(&id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.store());
    controller.delete(&id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted successfully")))
}
