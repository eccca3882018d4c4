use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quick_reservation::DEFAULT_SOURCE;
use crate::services::pricing::PriceBreakdown;
use crate::utils::validation::{validate_iso_date, validate_not_blank, PHONE_REGEX};

// Reserva rápida desde la tarjeta de un vehículo. El desglose que calcula el
// navegador no se acepta: se recalcula en el servidor.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateQuickReservationRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "El nombre no puede superar 100 caracteres")
    )]
    pub full_name: String,
    #[validate(regex(path = "PHONE_REGEX", message = "Teléfono inválido"))]
    pub phone: String,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_iso_date")]
    pub dropoff_date: String,
    #[validate(length(max = 50))]
    pub vehicle_id: Option<String>,
    /// Precio diario de respaldo si el vehículo no existe o no tiene precio legible
    #[validate(range(min = 0.0, message = "El precio diario no puede ser negativo"))]
    pub daily_price: Option<f64>,
    #[validate(length(max = 100, message = "El origen no puede superar 100 caracteres"))]
    pub source: Option<String>,
}

impl CreateQuickReservationRequest {
    pub fn vehicle(&self) -> Option<String> {
        self.vehicle_id
            .as_ref()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn source(&self) -> String {
        self.source
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateQuickReservationRequest {
    #[validate(custom = "validate_not_blank")]
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReservationCreatedResponse {
    pub id: i64,
    pub reservation_id: i64,
    pub pricing: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_defaults() {
        let request = CreateQuickReservationRequest {
            full_name: "Ada".to_string(),
            phone: "+90 555 123 4567".to_string(),
            pickup_date: "2025-07-01".to_string(),
            dropoff_date: "2025-07-03".to_string(),
            source: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.source(), DEFAULT_SOURCE);
        assert_eq!(request.vehicle(), None);
    }
}
