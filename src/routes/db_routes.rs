use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use validator::Validate;

use crate::dto::db_admin_dto::QueryRequest;
use crate::middleware::auth::require_root;
use crate::services::db_admin_service::{DbAdminService, QueryOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Consola SQL, solo para root
pub fn create_db_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/tables", get(list_tables))
        .route("/table/:name", get(table_rows))
        .route("/query", post(run_query))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_root))
}

async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let service = DbAdminService::new(state.pool.clone());
    Ok(Json(service.tables().await?))
}

async fn table_rows(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let service = DbAdminService::new(state.pool.clone());
    Ok(Json(service.table_rows(&name).await?))
}

async fn run_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryOutcome>, AppError> {
    request.validate()?;
    let service = DbAdminService::new(state.pool.clone());
    Ok(Json(service.run_query(&request.query).await?))
}
