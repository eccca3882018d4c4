//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error de validación a nivel de campo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Validation error: {0:?}")]
    FieldErrors(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            code: code.to_string(),
            errors: None,
        }
    }

    fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// `pickup_date` -> `pickupDate`, como llegan los campos en el JSON
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Aplana los errores del crate validator a una lista ordenada por campo
pub fn flatten_validation_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut flat: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(field);
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido para '{}'", field)),
            })
        })
        .collect();
    flat.sort_by(|a, b| a.field.cmp(&b.field).then(a.code.cmp(&b.code)));
    flat
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", "Registro no encontrado", "NOT_FOUND"),
            ),

            AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!("⚠️ Violación de unicidad: {}", db_err);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Conflict", "El registro ya existe", "CONFLICT"),
                )
            }

            AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_check_violation() => {
                tracing::warn!("⚠️ Restricción CHECK violada: {}", db_err);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", "Algún valor excede los límites permitidos", "BAD_REQUEST"),
                )
            }

            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database",
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Validation Error", "The provided data is invalid", "VALIDATION_ERROR")
                        .with_errors(flatten_validation_errors(&e)),
                )
            }

            AppError::FieldErrors(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation Error", "The provided data is invalid", "VALIDATION_ERROR")
                    .with_errors(errors),
            ),

            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),
                )
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("Forbidden", msg, "FORBIDDEN"),
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflict", msg, "CONFLICT"),
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
            ),

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal Server Error", "An unexpected error occurred", "INTERNAL_ERROR"),
                )
            }

            AppError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(
                    "Rate Limit Exceeded",
                    "Too many requests. Please try again later",
                    "RATE_LIMIT_EXCEEDED",
                ),
            ),

            AppError::Jwt(msg) => {
                tracing::error!("❌ JWT error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("JWT Error", "Could not issue token", "JWT_ERROR"),
                )
            }

            AppError::Hash(msg) => {
                tracing::error!("❌ Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "An error occurred while processing credentials",
                        "HASH_ERROR",
                    ),
                )
            }

            AppError::ExternalApi(msg) => {
                tracing::error!("❌ External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        "External API Error",
                        "An error occurred while communicating with external service",
                        "EXTERNAL_API_ERROR",
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &str, code: &str, message: impl Into<String>) -> AppError {
    AppError::FieldErrors(vec![FieldError::new(field, code, message)])
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}
