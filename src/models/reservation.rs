//! Modelo de Reservation
//!
//! Incluye la máquina de estados de reservas, compartida con las reservas rápidas.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[serde(alias = "yeni")]
    New,
    PendingPayment,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::New => "new",
            ReservationStatus::PendingPayment => "pending_payment",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Estados alcanzables desde el actual
    pub fn allowed_next(&self) -> &'static [ReservationStatus] {
        use ReservationStatus::*;
        match self {
            New => &[PendingPayment, Confirmed, Cancelled],
            PendingPayment => &[Confirmed, Cancelled],
            Confirmed => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        *self == next || self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" | "yeni" => Ok(ReservationStatus::New),
            "pending_payment" => Ok(ReservationStatus::PendingPayment),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("Estado de reserva desconocido: {}", other)),
        }
    }
}

/// Reserva con datos del vehículo y del cliente (LEFT JOIN)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub dropoff_date: String,
    pub dropoff_time: String,
    pub vehicle_id: Option<String>,
    pub customer_id: Option<i64>,
    pub different_dropoff: bool,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub total_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
    pub vehicle_image: Option<String>,
    pub customer_name: Option<String>,
}

/// Datos para insertar una reserva
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub dropoff_date: String,
    pub dropoff_time: String,
    pub vehicle_id: Option<String>,
    pub customer_id: Option<i64>,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub total_price: Option<f64>,
}

impl NewReservation {
    pub fn different_dropoff(&self) -> bool {
        self.pickup_location.trim() != self.dropoff_location.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_transitions() {
        use ReservationStatus::*;
        assert!(New.can_transition_to(PendingPayment));
        assert!(New.can_transition_to(Confirmed));
        assert!(PendingPayment.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!New.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(Cancelled.can_transition_to(Cancelled));
        assert!(Completed.is_terminal());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("yeni".parse::<ReservationStatus>(), Ok(ReservationStatus::New));
        assert_eq!(
            "pending_payment".parse::<ReservationStatus>(),
            Ok(ReservationStatus::PendingPayment)
        );
        assert!("paid".parse::<ReservationStatus>().is_err());
    }
}
