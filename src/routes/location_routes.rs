use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use validator::Validate;

use crate::controllers::location_controller::LocationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::location_dto::{GroupedLocations, LocationRequest};
use crate::middleware::auth::require_admin;
use crate::models::location::Location;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/all", get(list_all_locations))
        .route("/", post(create_location))
        .route("/:id", put(update_location).delete(delete_location))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(list_locations))
        .route("/grouped", get(grouped_locations))
        .route("/:id", get(get_location))
        .merge(admin)
}

async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.list_active().await?))
}

async fn grouped_locations(State(state): State<AppState>) -> Result<Json<GroupedLocations>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.grouped().await?))
}

async fn list_all_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.list_all().await?))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Location>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<LocationRequest>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    request.validate()?;
    let controller = LocationController::new(state.pool.clone());
    let location = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<Location>, AppError> {
    request.validate()?;
    let controller = LocationController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Ubicación eliminada")))
}
