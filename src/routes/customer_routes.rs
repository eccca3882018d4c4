use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::auth_dto::LoginResponse;
use crate::dto::customer_dto::{CustomerLoginRequest, CustomerMeResponse, CustomerRegisterRequest, CustomerUpsertRequest};
use crate::middleware::auth::{require_customer, AuthenticatedUser};
use crate::middleware::rate_limit::login_rate_limit_middleware;
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route(
            "/login",
            post(login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit_middleware,
            )),
        )
        .route("/upsert", post(upsert))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state.clone(), require_customer)),
        )
}

fn controller(state: &AppState) -> CustomerController {
    CustomerController::new(state.pool.clone(), state.auth_service())
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<CustomerRegisterRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    request.validate()?;
    let response = controller(&state).register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<CustomerLoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    request.validate()?;
    Ok(Json(controller(&state).login(request).await?))
}

async fn upsert(
    State(state): State<AppState>,
    Json(request): Json<CustomerUpsertRequest>,
) -> Result<Json<Customer>, AppError> {
    request.validate()?;
    Ok(Json(controller(&state).upsert(request).await?))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<CustomerMeResponse>, AppError> {
    Ok(Json(controller(&state).me(user.id).await?))
}
