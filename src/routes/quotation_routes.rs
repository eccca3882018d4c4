use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::quotation_controller::QuotationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::quotation_dto::{CreateQuotationRequest, QuotationStatusResponse, UpdateQuotationRequest};
use crate::middleware::auth::require_admin;
use crate::models::quotation::Quotation;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quotation_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_quotations))
        .route(
            "/:id",
            get(get_quotation).put(update_quotation).delete(delete_quotation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/", post(create_quotation)).merge(admin)
}

async fn create_quotation(
    State(state): State<AppState>,
    Json(request): Json<CreateQuotationRequest>,
) -> Result<(StatusCode, Json<Quotation>), AppError> {
    request.validate()?;
    let controller = QuotationController::new(state.pool.clone());
    let quotation = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(quotation)))
}

async fn list_quotations(State(state): State<AppState>) -> Result<Json<Vec<Quotation>>, AppError> {
    let controller = QuotationController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Quotation>, AppError> {
    let controller = QuotationController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateQuotationRequest>,
) -> Result<Json<QuotationStatusResponse>, AppError> {
    request.validate()?;
    let controller = QuotationController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, &request.status).await?))
}

async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = QuotationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Cotización eliminada")))
}
