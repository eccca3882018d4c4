use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use validator::Validate;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::VehicleRequest;
use crate::middleware::auth::require_admin;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_vehicle))
        .route("/:id", put(update_vehicle).delete(delete_vehicle))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .merge(admin)
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(&id).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    request.validate()?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    request.validate()?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.update(&id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(&id).await?;
    Ok(Json(ApiResponse::message("Vehículo eliminado exitosamente")))
}
