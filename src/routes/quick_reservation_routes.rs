use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::quick_reservation_controller::QuickReservationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::quick_reservation_dto::{
    CreateQuickReservationRequest, QuickReservationCreatedResponse, UpdateQuickReservationRequest,
};
use crate::middleware::auth::require_admin;
use crate::models::quick_reservation::QuickReservation;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quick_reservation_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_quick_reservations))
        .route(
            "/:id",
            get(get_quick_reservation)
                .put(update_quick_reservation)
                .delete(delete_quick_reservation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/", post(create_quick_reservation)).merge(admin)
}

async fn create_quick_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateQuickReservationRequest>,
) -> Result<(StatusCode, Json<QuickReservationCreatedResponse>), AppError> {
    request.validate()?;
    let controller = QuickReservationController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_quick_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuickReservation>>, AppError> {
    let controller = QuickReservationController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_quick_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuickReservation>, AppError> {
    let controller = QuickReservationController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_quick_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateQuickReservationRequest>,
) -> Result<Json<QuickReservation>, AppError> {
    request.validate()?;
    let controller = QuickReservationController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, &request.status).await?))
}

async fn delete_quick_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = QuickReservationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Reserva rápida eliminada")))
}
