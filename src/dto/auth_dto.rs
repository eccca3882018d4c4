use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::jwt::{JwtClaims, Role};
use crate::utils::validation::{validate_strong_password, USERNAME_REGEX};

// Login de administrador
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50, message = "El usuario debe tener entre 3 y 50 caracteres"))]
    pub username: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
}

// Primer administrador del sistema
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SetupRequest {
    #[validate(
        length(min = 4, max = 50, message = "El usuario debe tener entre 4 y 50 caracteres"),
        regex(path = "USERNAME_REGEX", message = "Solo letras, números y _")
    )]
    pub username: String,
    #[validate(custom = "validate_strong_password")]
    pub password: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6, message = "La contraseña actual debe tener al menos 6 caracteres"))]
    pub old_password: String,
    #[validate(length(min = 6, message = "La nueva contraseña debe tener al menos 6 caracteres"))]
    pub new_password: String,
}

/// Identidad que se devuelve al cliente tras autenticarse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
}

impl From<&JwtClaims> for SessionUser {
    fn from(claims: &JwtClaims) -> Self {
        Self {
            id: claims.subject_id().unwrap_or_default(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            full_name: None,
            role: claims.role,
        }
    }
}

// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: SessionUser,
}

impl LoginResponse {
    pub fn success(token: String, user: SessionUser) -> Self {
        Self {
            success: true,
            token,
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_request_rules() {
        let ok = SetupRequest {
            username: "panel_admin".into(),
            password: "Guclu#Sifre1".into(),
            email: "admin@rentcar.test".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = SetupRequest {
            username: "ab-c".into(),
            password: "zayif".into(),
            email: "no-email".into(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }
}
