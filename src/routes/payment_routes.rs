use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::payment_dto::{MockIntentRequest, MockIntentResponse};
use crate::middleware::auth::require_admin;
use crate::models::payment::Payment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_payments))
        .route("/:id", get(get_payment).delete(delete_payment))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/mock-intent", post(mock_intent)).merge(admin)
}

async fn mock_intent(
    State(state): State<AppState>,
    Json(request): Json<MockIntentRequest>,
) -> Result<Json<MockIntentResponse>, AppError> {
    request.validate()?;
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.mock_intent(request).await?))
}

async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Pago eliminado")))
}
