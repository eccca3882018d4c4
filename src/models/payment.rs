//! Modelo de Payment (flujo simulado, sin pasarela real)
//!
//! Nunca se persisten el número completo de tarjeta ni el CVV.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MOCK_PROVIDER: &str = "mock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentStatus {
    PendingManual,
    Succeeded,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PendingManual => "pending_manual",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Marca de la tarjeta según el primer dígito
pub fn card_brand(card_number: &str) -> &'static str {
    match card_number.chars().find(|c| c.is_ascii_digit()) {
        Some('4') => "Visa",
        Some('5') => "Mastercard",
        Some('3') => "Amex/Diners",
        _ => "Card",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub reservation_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub provider: String,
    pub intent_id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub currency: String,
    pub card_brand: Option<String>,
    pub card_last4: Option<String>,
    pub card_holder: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reservation_name: Option<String>,
    pub customer_name: Option<String>,
}

/// Datos de tarjeta ya reducidos a lo que se puede guardar
#[derive(Debug, Clone)]
pub struct CardSummary {
    pub brand: String,
    pub last4: String,
    pub holder: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
}

impl CardSummary {
    pub fn from_card(
        card_number: &str,
        holder: Option<String>,
        expiry_month: Option<String>,
        expiry_year: Option<String>,
    ) -> Self {
        let digits = crate::utils::validation::card_digits(card_number);
        let last4 = digits[digits.len().saturating_sub(4)..].to_string();

        Self {
            brand: card_brand(&digits).to_string(),
            last4,
            holder,
            expiry_month,
            expiry_year,
        }
    }
}


/// Datos para insertar un pago simulado
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub reservation_id: i64,
    pub customer_id: Option<i64>,
    pub intent_id: String,
    pub amount: f64,
    pub currency: String,
    pub card: CardSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_brand() {
        assert_eq!(card_brand("4111111111111111"), "Visa");
        assert_eq!(card_brand("5500 0000 0000 0004"), "Mastercard");
        assert_eq!(card_brand("371449635398431"), "Amex/Diners");
        assert_eq!(card_brand("6011000990139424"), "Card");
    }

    #[test]
    fn test_card_summary_keeps_only_last_four() {
        let summary = CardSummary::from_card("4111 1111 1111 1234", Some("Ada".into()), None, None);
        assert_eq!(summary.brand, "Visa");
        assert_eq!(summary.last4, "1234");
    }
}
