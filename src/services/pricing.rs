//! Calculadora de precios de alquiler
//!
//! Única fuente de verdad para días, subtotal, IVA, descuento y total. La usan
//! la vista previa, las reservas, las reservas rápidas y el pago simulado.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::setting::{DEFAULT_DISCOUNT_RATE, DEFAULT_VAT_RATE};
use crate::utils::errors::{AppError, FieldError};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("La fecha de devolución debe ser posterior a la de recogida")]
    InvalidPeriod,

    #[error("El precio diario no puede ser negativo")]
    NegativeDailyPrice,

    #[error("La tasa '{0}' debe estar entre 0 y 100")]
    RateOutOfRange(&'static str),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let field = match &err {
            PricingError::InvalidPeriod => "dropoffDate",
            PricingError::NegativeDailyPrice => "dailyPrice",
            PricingError::RateOutOfRange(name) => *name,
        };
        AppError::FieldErrors(vec![FieldError::new(field, "pricing", err.to_string())])
    }
}

/// Tasas porcentuales del sitio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rates {
    pub vat_rate: f64,
    pub discount_rate: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            vat_rate: DEFAULT_VAT_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl Rates {
    fn validate(&self) -> Result<(), PricingError> {
        if !(0.0..=100.0).contains(&self.vat_rate) {
            return Err(PricingError::RateOutOfRange("vatRate"));
        }
        if !(0.0..=100.0).contains(&self.discount_rate) {
            return Err(PricingError::RateOutOfRange("discountRate"));
        }
        Ok(())
    }
}

/// Desglose de precio ya redondeado a céntimos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub days: i64,
    pub daily_price: f64,
    pub subtotal: f64,
    pub vat_rate: f64,
    pub vat_amount: f64,
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub total_price: f64,
}

/// Redondeo a 2 decimales, mitades lejos de cero
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Porcentaje guardado como texto (`20`, `17.5`, `17,5`); fuera de 0..=100 es `None`
pub fn parse_rate(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && (0.0..=100.0).contains(rate))
}

/// Número de periodos de 24 h iniciados entre recogida y devolución
pub fn rental_days(pickup: NaiveDateTime, dropoff: NaiveDateTime) -> Result<i64, PricingError> {
    if dropoff <= pickup {
        return Err(PricingError::InvalidPeriod);
    }
    let seconds = (dropoff - pickup).num_seconds();
    Ok((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY)
}

/// Calcula el desglose para un número de días ya conocido
pub fn calculate(days: i64, daily_price: f64, rates: Rates) -> Result<PriceBreakdown, PricingError> {
    if days <= 0 {
        return Err(PricingError::InvalidPeriod);
    }
    if !daily_price.is_finite() || daily_price < 0.0 {
        return Err(PricingError::NegativeDailyPrice);
    }
    rates.validate()?;

    let subtotal = days as f64 * daily_price;
    let vat_amount = subtotal * rates.vat_rate / 100.0;
    let before_discount = subtotal + vat_amount;
    let discount_amount = before_discount * rates.discount_rate / 100.0;
    let total = before_discount - discount_amount;

    Ok(PriceBreakdown {
        days,
        daily_price: round_money(daily_price),
        subtotal: round_money(subtotal),
        vat_rate: rates.vat_rate,
        vat_amount: round_money(vat_amount),
        discount_rate: rates.discount_rate,
        discount_amount: round_money(discount_amount),
        total_price: round_money(total),
    })
}

/// Cotización completa a partir de fechas de recogida y devolución
pub fn quote(
    daily_price: f64,
    pickup: NaiveDateTime,
    dropoff: NaiveDateTime,
    rates: Rates,
) -> Result<PriceBreakdown, PricingError> {
    let days = rental_days(pickup, dropoff)?;
    calculate(days, daily_price, rates)
}

/// Extrae el valor numérico de un precio mostrado (`₺1.250`, `1.250,50 TL`, `450`)
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        // Formato turco: punto de miles, coma decimal
        cleaned.replace('.', "").replace(',', ".")
    } else if let Some(pos) = cleaned.rfind('.') {
        let decimals = cleaned.len() - pos - 1;
        if decimals == 3 || cleaned.matches('.').count() > 1 {
            cleaned.replace('.', "")
        } else {
            cleaned
        }
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::parse_date_time;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        parse_date_time(date, Some(time)).unwrap()
    }

    #[test]
    fn test_rental_days_uses_started_periods() {
        assert_eq!(rental_days(at("2025-07-01", "10:00"), at("2025-07-04", "10:00")), Ok(3));
        assert_eq!(rental_days(at("2025-07-01", "10:00"), at("2025-07-04", "10:01")), Ok(4));
        assert_eq!(rental_days(at("2025-07-01", "10:00"), at("2025-07-01", "12:00")), Ok(1));
    }

    #[test]
    fn test_rental_days_rejects_non_positive_periods() {
        let start = at("2025-07-01", "10:00");
        assert_eq!(rental_days(start, start), Err(PricingError::InvalidPeriod));
        assert_eq!(
            rental_days(start, at("2025-06-30", "10:00")),
            Err(PricingError::InvalidPeriod)
        );
    }

    #[test]
    fn test_breakdown_matches_closed_formula() {
        let rates = Rates {
            vat_rate: 20.0,
            discount_rate: 15.0,
        };
        let cases = [(1, 450.0), (3, 499.99), (7, 1250.0), (30, 333.33)];
        for (days, rate) in cases {
            let b = calculate(days, rate, rates).unwrap();
            let expected = days as f64 * rate * 1.2 * 0.85;
            assert!((b.total_price - expected).abs() <= 0.005 + 1e-9, "{} días a {}", days, rate);
        }
    }

    #[test]
    fn test_breakdown_parts() {
        let b = calculate(3, 450.0, Rates::default()).unwrap();
        assert_eq!(b.subtotal, 1350.0);
        assert_eq!(b.vat_amount, 270.0);
        assert_eq!(b.discount_amount, 243.0);
        assert_eq!(b.total_price, 1377.0);
    }

    #[test]
    fn test_quote_with_dates() {
        let b = quote(
            500.0,
            parse_date_time("2025-07-01", None).unwrap(),
            parse_date_time("2025-07-03", None).unwrap(),
            Rates {
                vat_rate: 0.0,
                discount_rate: 0.0,
            },
        )
        .unwrap();
        assert_eq!(b.days, 2);
        assert_eq!(b.total_price, 1000.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            calculate(2, -1.0, Rates::default()),
            Err(PricingError::NegativeDailyPrice)
        );
        assert_eq!(
            calculate(
                2,
                100.0,
                Rates {
                    vat_rate: 120.0,
                    discount_rate: 0.0
                }
            ),
            Err(PricingError::RateOutOfRange("vatRate"))
        );
        assert_eq!(calculate(0, 100.0, Rates::default()), Err(PricingError::InvalidPeriod));
    }

    #[test]
    fn test_parse_price_formats() {
        assert_eq!(parse_price("₺450"), Some(450.0));
        assert_eq!(parse_price("₺1.250"), Some(1250.0));
        assert_eq!(parse_price("1.250,50 TL"), Some(1250.5));
        assert_eq!(parse_price("1250.75"), Some(1250.75));
        assert_eq!(parse_price("1.000.000"), Some(1_000_000.0));
        assert_eq!(parse_price("Sorunuz"), None);
    }
}
