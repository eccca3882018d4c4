//! Rutas HTTP
//!
//! Un router por recurso; `create_api_router` los monta bajo `/api`.

pub mod auth_routes;
pub mod backup_routes;
pub mod customer_routes;
pub mod db_routes;
pub mod location_routes;
pub mod payment_routes;
pub mod pricing_routes;
pub mod quick_reservation_routes;
pub mod quotation_routes;
pub mod reservation_routes;
pub mod settings_routes;
pub mod user_routes;
pub mod vehicle_routes;
pub mod visitor_routes;

use axum::{http::Uri, middleware, Router};

use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Todas las rutas de la API con el limitador general
pub fn create_api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes::create_auth_router(state))
        .nest("/customers", customer_routes::create_customer_router(state))
        .nest("/vehicles", vehicle_routes::create_vehicle_router(state))
        .nest("/quotations", quotation_routes::create_quotation_router(state))
        .nest("/reservations", reservation_routes::create_reservation_router(state))
        .nest(
            "/quick-reservations",
            quick_reservation_routes::create_quick_reservation_router(state),
        )
        .nest("/locations", location_routes::create_location_router(state))
        .nest("/settings", settings_routes::create_settings_router(state))
        .nest("/users", user_routes::create_user_router(state))
        .nest("/payments", payment_routes::create_payment_router(state))
        .nest("/pricing", pricing_routes::create_pricing_router())
        .nest("/backups", backup_routes::create_backup_router(state))
        .nest("/db", db_routes::create_db_router(state))
        .merge(visitor_routes::create_visitor_router(state))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit_middleware))
}

async fn api_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Ruta no encontrada: {}", uri.path()))
}
