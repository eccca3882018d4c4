//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::services::auth_service::AuthService;
use crate::services::geolocation_service::{GeoLocator, IpApiGeoLocator};
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub geolocator: Arc<dyn GeoLocator>,
    pub rate_limit: RateLimitState,
    pub login_rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Result<Self, AppError> {
        let geolocator = Arc::new(IpApiGeoLocator::from_config(&config)?);
        Ok(Self::with_geolocator(pool, config, geolocator))
    }

    /// Estado con un geolocalizador concreto (pruebas o proveedores alternativos)
    pub fn with_geolocator(pool: SqlitePool, config: EnvironmentConfig, geolocator: Arc<dyn GeoLocator>) -> Self {
        Self {
            pool,
            jwt: JwtConfig::from(&config),
            geolocator,
            rate_limit: RateLimitState::general(&config),
            login_rate_limit: RateLimitState::login(&config),
            config: Arc::new(config),
        }
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.pool.clone(),
            self.jwt.clone(),
            self.config.root_password_hash.clone(),
        )
    }
}
