use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::{method_not_allowed, with_total_count};
use crate::controllers::driver_controller::DriverController;
use crate::dto::api_response::ApiResponse;
use crate::dto::driver_dto::{DriverListQuery, DriverRequest, DriverResponse, DriverViewQuery};
use crate::middleware::{JsonBody, QueryParams, ValidId};
use crate::models::driver::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_drivers)
                .post(create_driver)
                .fallback(method_not_allowed(&["GET", "POST"])),
        )
        .route(
            "/:id",
            get(get_driver)
                .put(update_driver)
                .delete(delete_driver)
                .fallback(method_not_allowed(&["GET", "PUT", "DELETE"])),
        )
}

async fn list_drivers(
    State(state): State<AppState>,
    QueryParams(filters): QueryParams<DriverListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = DriverController::new(state.store());
    let listing = controller.list(&filters).await?;

    let drivers: Vec<DriverResponse> = listing
        .items
        .into_iter()
        .map(|driver| DriverResponse::render(driver, filters.view))
        .collect();

    Ok(with_total_count(listing.total, Json(drivers)))
}

async fn create_driver(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let controller = DriverController::new(state.store());
    let driver = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn get_driver(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    QueryParams(query): QueryParams<DriverViewQuery>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.store());
    let driver = controller.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success_with_message(
        DriverResponse::render(driver, query.view),
        "Driver retrieved successfully",
    )))
}

async fn update_driver(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    QueryParams(query): QueryParams<DriverViewQuery>,
    JsonBody(request): JsonBody<DriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.store());
    let driver = controller.update(&id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        DriverResponse::render(driver, query.view),
        "Driver updated successfully",
    )))
}

async fn delete_driver(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DriverController::new(state.store());
    controller.delete(&id).await?;
    Ok(Json(ApiResponse::message("Driver deleted successfully")))
}
