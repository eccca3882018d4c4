//! Modelo de QuickReservation (reserva rápida desde la tarjeta del vehículo)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::reservation::ReservationStatus;

pub const DEFAULT_SOURCE: &str = "quick-card-modal";

/// Valores fijos con los que se replica en la tabla de reservas
pub const PLACEHOLDER_EMAIL: &str = "hizli@rezervasyon.temp";
pub const PLACEHOLDER_LOCATION: &str = "Merkez Ofis";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuickReservation {
    pub id: i64,
    pub reservation_id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub pickup_date: String,
    pub dropoff_date: String,
    pub vehicle_id: Option<String>,
    pub days: i64,
    pub daily_price: f64,
    pub subtotal: f64,
    pub vat_rate: f64,
    pub vat_amount: f64,
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub total_price: f64,
    pub source: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
    pub vehicle_price: Option<String>,
}

/// Datos para insertar una reserva rápida con su desglose ya calculado
#[derive(Debug, Clone)]
pub struct NewQuickReservation {
    pub reservation_id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub pickup_date: String,
    pub dropoff_date: String,
    pub vehicle_id: Option<String>,
    pub pricing: crate::services::pricing::PriceBreakdown,
    pub source: String,
}

impl NewQuickReservation {
    /// Nota que se guarda en la reserva espejo
    pub fn summary_note(&self) -> String {
        format!(
            "Hızlı Rezervasyon ({})\nGün: {}, Günlük: {} TL\nAra Toplam: {} TL, KDV: {} TL, İndirim: {} TL",
            self.source,
            self.pricing.days,
            self.pricing.daily_price,
            self.pricing.subtotal,
            self.pricing.vat_amount,
            self.pricing.discount_amount
        )
    }
}
