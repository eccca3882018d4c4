use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reservation::{NewReservation, ReservationStatus};
use crate::services::pricing::PriceBreakdown;
use crate::utils::validation::{validate_iso_date, validate_not_blank, validate_time, PHONE_REGEX};

// Formulario público de reserva
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "El nombre no puede superar 100 caracteres")
    )]
    pub full_name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(regex(path = "PHONE_REGEX", message = "Teléfono inválido"))]
    pub phone: String,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub pickup_location: String,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub dropoff_location: String,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_time")]
    pub pickup_time: String,
    #[validate(custom = "validate_iso_date")]
    pub dropoff_date: String,
    #[validate(custom = "validate_time")]
    pub dropoff_time: String,
    #[validate(length(max = 50))]
    pub vehicle_id: Option<String>,
    pub customer_id: Option<i64>,
    #[validate(length(max = 500, message = "Las peticiones especiales no pueden superar 500 caracteres"))]
    pub special_requests: Option<String>,
    /// Solo se usa si el vehículo no tiene un precio diario interpretable
    #[validate(range(min = 0.0, message = "El total no puede ser negativo"))]
    pub total_price: Option<f64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateReservationRequest {
    pub fn vehicle(&self) -> Option<String> {
        non_empty(self.vehicle_id.clone())
    }

    pub fn into_new_reservation(self, total_price: Option<f64>) -> NewReservation {
        NewReservation {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            pickup_location: self.pickup_location.trim().to_string(),
            dropoff_location: self.dropoff_location.trim().to_string(),
            pickup_date: self.pickup_date.trim().to_string(),
            pickup_time: self.pickup_time.trim().to_string(),
            dropoff_date: self.dropoff_date.trim().to_string(),
            dropoff_time: self.dropoff_time.trim().to_string(),
            vehicle_id: non_empty(self.vehicle_id),
            customer_id: self.customer_id,
            special_requests: non_empty(self.special_requests),
            status: ReservationStatus::New,
            total_price,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[validate(custom = "validate_not_blank")]
    pub status: String,
    #[validate(range(min = 0.0, message = "El total no puede ser negativo"))]
    pub total_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    pub id: Option<i64>,
}

// Respuesta de creación con el desglose aplicado, si lo hubo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedResponse {
    pub id: i64,
    pub status: ReservationStatus,
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PriceBreakdown>,
}
