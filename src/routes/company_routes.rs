use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::method_not_allowed;
use crate::controllers::company_controller::CompanyController;
use crate::dto::api_response::ApiResponse;
use crate::dto::company_dto::CompanyRequest;
use crate::middleware::JsonBody;
use crate::models::company::Company;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_company)
            .post(save_company)
            .put(save_company)
            .fallback(method_not_allowed(&["GET", "POST", "PUT"])),
    )
}

async fn get_company(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(state.store());
    let company = controller.get().await?;
    Ok(Json(ApiResponse::success_with_message(
        company,
        "Company information retrieved successfully",
    )))
}

// POST y PUT: crear la empresa si no existe, reemplazarla si ya existe
async fn save_company(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), AppError> {
    let controller = CompanyController::new(state.store());
    let (company, created) = controller.save(request).await?;

    let response = if created {
        (
            StatusCode::CREATED,
            Json(ApiResponse::success_with_message(company, "Company created successfully")),
        )
    } else {
        (
            StatusCode::OK,
            Json(ApiResponse::success_with_message(company, "Company updated successfully")),
        )
    };
    Ok(response)
}
