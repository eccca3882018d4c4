use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::require_admin;
use crate::services::backup_service::{BackupInfo, BackupService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_backup_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_backups).post(create_backup))
        .route("/create", post(create_backup))
        .route("/download/:filename", get(download_backup))
        .route("/:filename", delete(delete_backup))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

fn service(state: &AppState) -> BackupService {
    BackupService::new(state.pool.clone(), state.config.backup_dir.clone())
}

async fn list_backups(State(state): State<AppState>) -> Result<Json<Vec<BackupInfo>>, AppError> {
    Ok(Json(service(&state).list().await?))
}

async fn create_backup(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<BackupInfo>>), AppError> {
    let backup = service(&state).create().await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(backup, "Copia de seguridad creada")),
    ))
}

async fn download_backup(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = service(&state).read(&filename).await?;
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

async fn delete_backup(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service(&state).delete(&filename).await?;
    Ok(Json(ApiResponse::message("Copia de seguridad eliminada")))
}
