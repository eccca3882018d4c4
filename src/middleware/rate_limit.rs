//! Middleware de Rate Limiting
//!
//! Este módulo maneja la limitación de velocidad de requests por IP con
//! ventanas fijas, para prevenir abuso de la API y fuerza bruta en el login.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado de un limitador
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
    whitelist: Arc<HashSet<String>>,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_duration: Duration, whitelist: &[String]) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
            whitelist: Arc::new(whitelist.iter().cloned().collect()),
        }
    }

    /// Limitador general para todas las rutas `/api`
    pub fn general(config: &EnvironmentConfig) -> Self {
        Self::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
            &config.rate_limit_whitelist,
        )
    }

    /// Limitador de intentos de login (solo cuentan los fallidos)
    pub fn login(config: &EnvironmentConfig) -> Self {
        Self::new(
            config.login_rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
            &config.rate_limit_whitelist,
        )
    }

    pub fn is_whitelisted(&self, ip: &str) -> bool {
        self.whitelist.contains(ip)
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), RateLimitError> {
        if self.is_whitelisted(ip) {
            return Ok(());
        }

        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(RateLimitError::LimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }

    /// Devuelve una petición ya contada (login correcto)
    pub async fn release(&self, ip: &str) {
        let mut requests = self.requests.write().await;
        if let Some(info) = requests.get_mut(ip) {
            info.requests = info.requests.saturating_sub(1);
        }
    }
}

/// Errores de rate limiting
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded")]
    LimitExceeded,
}

impl From<RateLimitError> for AppError {
    fn from(_: RateLimitError) -> Self {
        AppError::RateLimitExceeded
    }
}

/// Las cabeceras solo cuentan detrás de proxies de confianza
fn request_ip(state: &AppState, request: &Request) -> String {
    let socket = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    extract_client_ip(request.headers(), socket, state.config.trusted_proxy_hops)
}

/// Middleware de rate limiting general
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request_ip(&state, &request);

    if let Err(e) = state.rate_limit.check_rate_limit(&ip).await {
        log::warn!("⚠️ Límite de peticiones superado para {}", ip);
        return Err(e.into());
    }

    Ok(next.run(request).await)
}

/// Middleware más estricto para los endpoints de login
pub async fn login_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request_ip(&state, &request);

    if let Err(e) = state.login_rate_limit.check_rate_limit(&ip).await {
        log::warn!("⚠️ Demasiados intentos de login desde {}", ip);
        return Err(e.into());
    }

    let response = next.run(request).await;
    if response.status().is_success() {
        state.login_rate_limit.release(&ip).await;
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_per_ip() {
        let limiter = RateLimitState::new(2, Duration::from_secs(60), &[]);
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_err());
        assert!(limiter.check_rate_limit("10.0.0.2").await.is_ok());
    }

    #[tokio::test]
    async fn test_whitelist_and_release() {
        let limiter = RateLimitState::new(1, Duration::from_secs(60), &["127.0.0.1".to_string()]);
        for _ in 0..5 {
            assert!(limiter.check_rate_limit("127.0.0.1").await.is_ok());
        }

        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        limiter.release("10.0.0.1").await;
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_err());
    }

    #[tokio::test]
    async fn test_window_expires() {
        let limiter = RateLimitState::new(1, Duration::from_millis(20), &[]);
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_err());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
    }
}
