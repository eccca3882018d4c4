//! Modelo de Location (puntos de entrega y devolución)

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LocationType {
    Airport,
    Office,
}

impl LocationType {
    pub const VALUES: [&'static str; 2] = ["airport", "office"];
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "airport" => Ok(LocationType::Airport),
            "office" => Ok(LocationType::Office),
            other => Err(format!("Tipo de ubicación desconocido: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub region: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
