use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quotation::QuotationStatus;
use crate::utils::validation::{validate_not_blank, PHONE_REGEX};

// Solicitud pública de cotización
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "El nombre no puede superar 100 caracteres")
    )]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(regex(path = "PHONE_REGEX", message = "Teléfono inválido"))]
    pub phone: String,
    #[validate(custom = "validate_not_blank")]
    pub vehicle_id: String,
    #[validate(length(max = 1000, message = "El mensaje no puede superar 1000 caracteres"))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateQuotationRequest {
    #[validate(custom = "validate_not_blank")]
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationStatusResponse {
    pub id: i64,
    pub status: QuotationStatus,
}
