//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para emitir y verificar los tokens
//! de sesión de administradores y clientes.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Rol que viaja dentro del token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    SuperAdmin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
            Role::Customer => "customer",
        }
    }

    /// Administradores del panel (incluye al superusuario)
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    /// Id numérico del sujeto (0 para el superusuario)
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub admin_expiration: Duration,
    pub customer_expiration: Duration,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            admin_expiration: Duration::hours(config.admin_token_hours),
            customer_expiration: Duration::days(config.customer_token_days),
        }
    }
}

impl JwtConfig {
    pub fn expiration_for(&self, role: Role) -> Duration {
        match role {
            Role::Customer => self.customer_expiration,
            Role::Admin | Role::SuperAdmin => self.admin_expiration,
        }
    }
}

/// Generar JWT token para un sujeto
pub fn generate_token(
    subject_id: i64,
    username: Option<String>,
    email: Option<String>,
    role: Role,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + config.expiration_for(role);

    let claims = JwtClaims {
        sub: subject_id.to_string(),
        username,
        email,
        role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token (firma y expiración)
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<JwtClaims>(token, &decoding_key, &validation)
        .map_err(|e| AppError::Forbidden(format!("Token inválido o expirado: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
