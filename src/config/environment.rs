//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Hash bcrypt fijo del superusuario `root`
pub const SYSTEM_ROOT_HASH: &str = "$2b$10$.WQwJqYDVh9g90rid45k3.p38nG/7ZFxSm5cbqj7ymj7jX52Ak2H2";

/// Orígenes conocidos del sitio y del servidor de desarrollo
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "https://kiralikcar.com",
    "https://www.kiralikcar.com",
];

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_token_hours: i64,
    pub customer_token_days: i64,
    pub root_password_hash: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub login_rate_limit_requests: u32,
    pub rate_limit_whitelist: Vec<String>,
    pub trusted_proxy_hops: usize,
    pub static_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub geolocation_url: String,
    pub geolocation_timeout_secs: u64,
    pub log_level: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be a valid value: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn list_var(name: &str, default: &[&str]) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno (`JWT_SECRET` es obligatorio)
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: parse_var("PORT", 3000)?,
            host: var_or("HOST", "0.0.0.0"),
            database_url: var_or("DATABASE_URL", "sqlite://data.db?mode=rwc"),
            jwt_secret,
            admin_token_hours: parse_var("ADMIN_TOKEN_HOURS", 24)?,
            customer_token_days: parse_var("CUSTOMER_TOKEN_DAYS", 30)?,
            root_password_hash: var_or("ROOT_PASSWORD_HASH", SYSTEM_ROOT_HASH),
            cors_origins: list_var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS),
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", 5000)?,
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", 900)?,
            login_rate_limit_requests: parse_var("LOGIN_RATE_LIMIT_REQUESTS", 20)?,
            rate_limit_whitelist: list_var("RATE_LIMIT_WHITELIST", &["127.0.0.1", "::1"]),
            trusted_proxy_hops: parse_var("TRUSTED_PROXY_HOPS", 0)?,
            static_dir: PathBuf::from(var_or("STATIC_DIR", "dist")),
            backup_dir: PathBuf::from(var_or("BACKUP_DIR", "backups")),
            geolocation_url: var_or("GEOLOCATION_URL", "http://ip-api.com/json"),
            geolocation_timeout_secs: parse_var("GEOLOCATION_TIMEOUT_SECS", 5)?,
            log_level: var_or("LOG_LEVEL", "info"),
        })
    }

    /// Configuración autocontenida para pruebas y herramientas
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.to_string(),
            admin_token_hours: 24,
            customer_token_days: 30,
            root_password_hash: SYSTEM_ROOT_HASH.to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            rate_limit_requests: 5000,
            rate_limit_window: 900,
            login_rate_limit_requests: 20,
            rate_limit_whitelist: Vec::new(),
            trusted_proxy_hops: 0,
            static_dir: PathBuf::from("dist"),
            backup_dir: env::temp_dir().join("rentcar-backups"),
            geolocation_url: "http://127.0.0.1:9/json".to_string(),
            geolocation_timeout_secs: 1,
            log_level: "debug".to_string(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de log para tracing-subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tests_config() {
        let config = EnvironmentConfig::for_tests("s");
        assert_eq!(config.jwt_secret, "s");
        assert_eq!(config.admin_token_hours, 24);
        assert_eq!(config.customer_token_days, 30);
        assert_eq!(config.trusted_proxy_hops, 0);
        assert!(!config.is_production());
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_server_url() {
        let mut config = EnvironmentConfig::for_tests("s");
        config.port = 3000;
        assert_eq!(config.server_url(), "127.0.0.1:3000");
    }
}
