//! API del sitio de alquiler de coches
//!
//! Vehículos, cotizaciones, reservas, pagos simulados, ubicaciones, ajustes,
//! analítica de visitas y el panel de administración sobre SQLite.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware as axum_middleware,
    response::{Html, IntoResponse, Response},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::middleware::cors::cors_middleware_with_origins;
use crate::middleware::security::block_sensitive_paths;
use crate::state::AppState;
use crate::utils::errors::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Router completo: API bajo `/api` y frontend estático para el resto
pub fn create_app(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.static_dir);
    let page = static_dir.join("404.html");
    let not_found = move || {
        let page = page.clone();
        async move { not_found_page(page).await }
    };
    let static_files = ServeDir::new(static_dir).not_found_service(not_found.into_service());

    Router::new()
        .nest("/api", routes::create_api_router(&state))
        .fallback_service(static_files)
        .layer(axum_middleware::from_fn(block_sensitive_paths))
        .layer(cors_middleware_with_origins(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `404.html` del frontend si existe; si no, el 404 JSON de la API
async fn not_found_page(page: PathBuf) -> Response {
    match tokio::fs::read(&page).await {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => AppError::NotFound("Recurso no encontrado".to_string()).into_response(),
    }
}
