use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, ReservationCreatedResponse, ReservationQuery, UpdateReservationRequest,
};
use crate::middleware::auth::require_admin;
use crate::models::reservation::Reservation;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_reservations))
        .route(
            "/:id",
            get(get_reservation).put(update_reservation).delete(delete_reservation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/", post(create_reservation)).merge(admin)
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationCreatedResponse>), AppError> {
    request.validate()?;
    let controller = ReservationController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    Ok(Json(controller.list(query.id).await?))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Reservation>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    request.validate()?;
    let controller = ReservationController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Reserva eliminada")))
}
