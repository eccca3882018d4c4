//! Modelo de Quotation (solicitudes de cotización)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Etapas de una cotización; solo se avanza hacia adelante
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuotationStatus {
    #[serde(alias = "yeni")]
    New,
    #[serde(alias = "iletisim")]
    Contacted,
    #[serde(alias = "bitirme_asamasinda")]
    Completing,
    #[serde(alias = "tamamlandi")]
    Done,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 4] = [
        QuotationStatus::New,
        QuotationStatus::Contacted,
        QuotationStatus::Completing,
        QuotationStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::New => "new",
            QuotationStatus::Contacted => "contacted",
            QuotationStatus::Completing => "completing",
            QuotationStatus::Done => "done",
        }
    }

    /// Repetir el estado actual es válido (no-op); retroceder no
    pub fn can_transition_to(&self, next: QuotationStatus) -> bool {
        next >= *self
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QuotationStatus::Done)
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" | "yeni" => Ok(QuotationStatus::New),
            "contacted" | "iletisim" => Ok(QuotationStatus::Contacted),
            "completing" | "bitirme_asamasinda" => Ok(QuotationStatus::Completing),
            "done" | "tamamlandi" => Ok(QuotationStatus::Done),
            other => Err(format!("Estado de cotización desconocido: {}", other)),
        }
    }
}

/// Cotización con el nombre del vehículo (LEFT JOIN)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_id: String,
    pub message: String,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only_transitions() {
        use QuotationStatus::*;
        assert!(New.can_transition_to(Contacted));
        assert!(New.can_transition_to(Done));
        assert!(Contacted.can_transition_to(Contacted));
        assert!(!Completing.can_transition_to(Contacted));
        assert!(!Done.can_transition_to(New));
        assert!(Done.is_terminal());
    }

    #[test]
    fn test_legacy_values_are_accepted() {
        assert_eq!("yeni".parse::<QuotationStatus>(), Ok(QuotationStatus::New));
        assert_eq!("tamamlandi".parse::<QuotationStatus>(), Ok(QuotationStatus::Done));
        assert!("görüldü".parse::<QuotationStatus>().is_err());

        let parsed: QuotationStatus = serde_json::from_str("\"iletisim\"").unwrap();
        assert_eq!(parsed, QuotationStatus::Contacted);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"contacted\"");
    }
}
