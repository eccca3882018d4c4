use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::controllers::user_controller::UserController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, CreatedResponse, UpdateUserRequest};
use crate::middleware::auth::{require_admin, AuthenticatedUser};
use crate::models::admin_user::AdminUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

fn controller(state: &AppState) -> UserController {
    UserController::new(state.pool.clone(), state.auth_service())
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<AdminUser>>, AppError> {
    Ok(Json(controller(&state).list().await?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    request.validate()?;
    let admin = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(admin.id, "Usuario creado")),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<AdminUser>, AppError> {
    request.validate()?;
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).delete(id, user.id).await?;
    Ok(Json(ApiResponse::message("Usuario eliminado")))
}
