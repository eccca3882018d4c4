use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::USERNAME_REGEX;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        length(min = 3, max = 50, message = "El usuario debe tener entre 3 y 50 caracteres"),
        regex(path = "USERNAME_REGEX", message = "Solo letras, números y _")
    )]
    pub username: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 3, max = 50, message = "El usuario debe tener entre 3 y 50 caracteres"),
        regex(path = "USERNAME_REGEX", message = "Solo letras, números y _")
    )]
    pub username: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: Option<String>,
}

// Respuesta de alta: `{ success, id, message }`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id,
            message: message.into(),
        }
    }
}
