use axum::{
    extract::State,
    middleware,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::settings_controller::SettingsController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::settings_dto::{SettingsMap, SettingsUpdateRequest};
use crate::middleware::auth::require_admin;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settings_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", put(update_settings))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().route("/", get(get_settings)).merge(admin)
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<SettingsMap>, AppError> {
    let controller = SettingsController::new(state.pool.clone());
    Ok(Json(controller.get_all().await?))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<SettingsUpdateRequest>,
) -> Result<Json<ApiResponse<SettingsMap>>, AppError> {
    let controller = SettingsController::new(state.pool.clone());
    let settings = controller.update(request).await?;
    Ok(Json(ApiResponse::success_with_message(settings, "Ajustes guardados")))
}
