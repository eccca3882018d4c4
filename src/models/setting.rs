//! Modelo de Setting (pares clave/valor de configuración del sitio)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const VAT_RATE_KEY: &str = "vatRate";
pub const DISCOUNT_RATE_KEY: &str = "discountRate";

pub const DEFAULT_VAT_RATE: f64 = 20.0;
pub const DEFAULT_DISCOUNT_RATE: f64 = 15.0;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Valores que se insertan si aún no existen
pub fn default_settings() -> Vec<(&'static str, &'static str)> {
    vec![
        ("siteName", "Kiralık Car"),
        ("phone", "0555 123 45 67"),
        ("email", "info@kiralikcar.com"),
        ("whatsappNumber", "905551234567"),
        ("colorTheme", "blue"),
        (VAT_RATE_KEY, "20"),
        (DISCOUNT_RATE_KEY, "15"),
        ("newYearEffect", "false"),
        ("newYearBannerText", "Yeni yılınız kutlu olsun!"),
    ]
}
