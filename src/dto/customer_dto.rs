use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::customer::{Customer, CustomerProfile};
use crate::models::reservation::Reservation;
use crate::utils::validation::{validate_not_blank, PHONE_REGEX};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerRegisterRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "El nombre no puede superar 100 caracteres")
    )]
    pub full_name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(custom = "validate_not_blank")]
    pub phone: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerLoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerUpsertRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(regex(path = "PHONE_REGEX", message = "Teléfono inválido"))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub address_line: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<CustomerUpsertRequest> for CustomerProfile {
    fn from(request: CustomerUpsertRequest) -> Self {
        Self {
            email: request.email.trim().to_lowercase(),
            full_name: trimmed(request.full_name),
            phone: trimmed(request.phone),
            address_line: trimmed(request.address_line),
            city: trimmed(request.city),
            country: trimmed(request.country),
            postal_code: trimmed(request.postal_code),
        }
    }
}

/// Perfil del cliente autenticado con sus reservas
#[derive(Debug, Serialize)]
pub struct CustomerMeResponse {
    pub user: Customer,
    pub reservations: Vec<Reservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_request_normalizes_profile() {
        let request = CustomerUpsertRequest {
            email: " Ada@Example.com ".into(),
            full_name: Some("  Ada Lovelace ".into()),
            phone: Some("   ".into()),
            ..Default::default()
        };
        let profile = CustomerProfile::from(request);
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.phone, None);
    }

    #[test]
    fn test_upsert_request_rejects_bad_phone() {
        let request = CustomerUpsertRequest {
            email: "ada@example.com".into(),
            phone: Some("abc".into()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
