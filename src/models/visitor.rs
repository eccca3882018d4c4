//! Modelo de Visitor (analítica de visitas)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: i64,
    pub ip: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub page_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
}

/// Visita lista para persistir
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisit {
    pub ip: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub page_url: Option<String>,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub country: String,
    pub city: String,
}

/// Conteo agrupado (`devices`, `browsers`, `countries`)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}
