//! Modelo de Vehicle
//!
//! Los precios se guardan tal como se muestran en la web (`₺1.250`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "Müsait";
pub const DEFAULT_IMAGE: &str = "/img/default.png";
pub const DEFAULT_PASSENGERS: i64 = 5;
pub const DEFAULT_FUEL: &str = "Benzin";
pub const DEFAULT_TRANSMISSION: &str = "Otomatik";
pub const DEFAULT_CATEGORY: &str = "Binek";

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub model: String,
    pub price: String,
    pub deposit: String,
    pub status: String,
    pub image: String,
    pub passengers: i64,
    pub fuel: String,
    pub transmission: String,
    pub category: String,
}

impl Vehicle {
    /// Precio diario numérico, si el texto se puede interpretar
    pub fn daily_price(&self) -> Option<f64> {
        crate::services::pricing::parse_price(&self.price)
    }
}
