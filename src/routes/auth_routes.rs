use axum::{extract::State, http::StatusCode, middleware, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{ChangePasswordRequest, LoginRequest, LoginResponse, SetupRequest, VerifyResponse};
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::CreatedResponse;
use crate::middleware::auth::{require_admin, require_auth, AuthenticatedUser};
use crate::middleware::rate_limit::login_rate_limit_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/setup", post(setup))
        .route(
            "/login",
            post(login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit_middleware,
            )),
        )
        .route(
            "/verify",
            post(verify).route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .route(
            "/change-password",
            post(change_password).route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
}

async fn setup(
    State(state): State<AppState>,
    Json(request): Json<SetupRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    request.validate()?;
    let controller = AuthController::new(state.auth_service());
    let created = controller.setup(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    request.validate()?;
    let controller = AuthController::new(state.auth_service());
    Ok(Json(controller.login(request).await?))
}

async fn verify(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<VerifyResponse> {
    let controller = AuthController::new(state.auth_service());
    Json(controller.verify(&user))
}

async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let controller = AuthController::new(state.auth_service());
    controller.change_password(&user, request).await?;
    Ok(Json(ApiResponse::message("Contraseña actualizada")))
}
