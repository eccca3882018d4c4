use axum::{
    extract::State,
    http::{header, HeaderMap},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::controllers::visitor_controller::VisitorController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::visitor_dto::{TrackVisitRequest, VisitorStats};
use crate::middleware::auth::require_admin;
use crate::models::visitor::Visitor;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;
use crate::utils::errors::AppError;

/// Rutas de analítica; se montan directamente bajo `/api`
pub fn create_visitor_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/stats/visitors", get(visitor_stats))
        .route("/admin/visitors/logs", get(visitor_logs))
        .route("/visitors/reset", post(reset_visitors))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/track-visit", post(track_visit)).merge(admin)
}

fn controller(state: &AppState) -> VisitorController {
    VisitorController::new(state.pool.clone(), state.geolocator.clone())
}

/// Responde de inmediato; el registro termina en segundo plano
async fn track_visit(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    Json(request): Json<TrackVisitRequest>,
) -> Result<Json<Value>, AppError> {
    request.validate()?;
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let controller = controller(&state);
    tokio::spawn(async move {
        if let Err(e) = controller.record(ip, user_agent, request).await {
            log::warn!("⚠️ No se pudo registrar la visita: {}", e);
        }
    });

    Ok(Json(json!({ "success": true })))
}

async fn visitor_stats(State(state): State<AppState>) -> Result<Json<VisitorStats>, AppError> {
    Ok(Json(controller(&state).stats().await?))
}

async fn visitor_logs(State(state): State<AppState>) -> Result<Json<Vec<Visitor>>, AppError> {
    Ok(Json(controller(&state).logs().await?))
}

async fn reset_visitors(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = controller(&state).reset().await?;
    Ok(Json(ApiResponse::message(format!("{} visitas eliminadas", deleted))))
}
