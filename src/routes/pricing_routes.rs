use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::controllers::pricing_controller::PricingController;
use crate::dto::pricing_dto::QuoteRequest;
use crate::services::pricing::PriceBreakdown;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pricing_router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<PriceBreakdown>, AppError> {
    request.validate()?;
    let controller = PricingController::new(state.pool.clone());
    Ok(Json(controller.quote(request).await?))
}
