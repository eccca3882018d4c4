use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::payment::{CardSummary, PaymentStatus};
use crate::utils::errors::{AppError, FieldError};
use crate::utils::validation::{validate_card_number, validate_currency, validate_iso_date, validate_time, PHONE_REGEX};

pub const DEFAULT_CURRENCY: &str = "TRY";

// Pago simulado. Sin `reservationId` se crea también la reserva con los
// datos de contacto y fechas del cuerpo.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct MockIntentRequest {
    pub reservation_id: Option<i64>,
    #[validate(length(max = 100, message = "El nombre no puede superar 100 caracteres"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(regex(path = "PHONE_REGEX", message = "Teléfono inválido"))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub pickup_location: Option<String>,
    #[validate(length(max = 200))]
    pub dropoff_location: Option<String>,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: Option<String>,
    #[validate(custom = "validate_time")]
    pub pickup_time: Option<String>,
    #[validate(custom = "validate_iso_date")]
    pub dropoff_date: Option<String>,
    #[validate(custom = "validate_time")]
    pub dropoff_time: Option<String>,
    #[validate(length(max = 50))]
    pub vehicle_id: Option<String>,
    #[validate(
        required(message = "El importe es requerido"),
        range(min = 0.0, message = "El importe no puede ser negativo")
    )]
    pub amount: Option<f64>,
    #[validate(custom = "validate_currency")]
    pub currency: Option<String>,
    #[validate(custom = "validate_card_number")]
    pub card_number: String,
    #[validate(length(max = 100))]
    pub card_holder: Option<String>,
    #[validate(length(max = 2))]
    pub expiry_month: Option<String>,
    #[validate(length(max = 4))]
    pub expiry_year: Option<String>,
    /// Se acepta por compatibilidad con el formulario; nunca se guarda
    #[validate(length(max = 4))]
    pub cvv: Option<String>,
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MockIntentRequest {
    pub fn currency(&self) -> String {
        clean(&self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    pub fn card_summary(&self) -> CardSummary {
        CardSummary::from_card(
            &self.card_number,
            clean(&self.card_holder),
            clean(&self.expiry_month),
            clean(&self.expiry_year),
        )
    }

    /// Campos obligatorios cuando el pago crea su propia reserva
    pub fn require_reservation_fields(&self) -> Result<(), AppError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("pickupDate", &self.pickup_date),
            ("dropoffDate", &self.dropoff_date),
        ];

        let errors: Vec<FieldError> = required
            .iter()
            .filter(|(_, value)| clean(value).is_none())
            .map(|(field, _)| FieldError::new(field, "required", "Campo requerido sin reservationId"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::FieldErrors(errors))
        }
    }

    pub fn clean_field(value: &Option<String>) -> Option<String> {
        clean(value)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockIntentResponse {
    pub success: bool,
    pub reservation_id: i64,
    pub payment_id: i64,
    pub intent_id: String,
    pub status: PaymentStatus,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> MockIntentRequest {
        MockIntentRequest {
            reservation_id: Some(1),
            amount: Some(1500.0),
            card_number: "4111 1111 1111 1111".to_string(),
            cvv: Some("123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_with_reservation() {
        let request = base_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.currency(), DEFAULT_CURRENCY);
        assert_eq!(request.card_summary().last4, "1111");
    }

    #[test]
    fn test_invalid_amount_currency_and_card() {
        let request = MockIntentRequest {
            amount: Some(-1.0),
            currency: Some("GBP".to_string()),
            card_number: "4111".to_string(),
            ..base_request()
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("amount"));
        assert!(fields.contains_key("currency"));
        assert!(fields.contains_key("card_number"));

        let missing = MockIntentRequest {
            amount: None,
            ..base_request()
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_reservation_fields_required_without_id() {
        let request = MockIntentRequest {
            reservation_id: None,
            email: Some("ada@example.com".to_string()),
            ..base_request()
        };
        match request.require_reservation_fields() {
            Err(AppError::FieldErrors(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["fullName", "phone", "pickupDate", "dropoffDate"]);
            }
            other => panic!("se esperaban errores de campo: {:?}", other.is_ok()),
        }
    }
}
