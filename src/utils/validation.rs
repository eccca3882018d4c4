//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos. Las funciones `validate_*` siguen la firma
//! que espera `#[validate(custom = "...")]`.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Teléfono: dígitos, espacios, `+`, paréntesis y guiones (10-20 caracteres)
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9+\s()-]{10,20}$").unwrap();
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    pub static ref TABLE_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    pub static ref SETTING_KEY_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.-]{1,100}$").unwrap();
    pub static ref TIME_REGEX: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").unwrap();
}

/// Hora por defecto cuando un formulario solo envía fechas
pub const DEFAULT_HANDOVER_TIME: &str = "10:00";

const PASSWORD_SPECIALS: &str = "@$!%*?&#";

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Convierte una fecha ISO (`YYYY-MM-DD` o RFC3339) a `NaiveDate`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Convierte `HH:MM` o `HH:MM:SS` a `NaiveTime`
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .ok()
        .or_else(|| NaiveTime::parse_from_str(value, "%H:%M:%S").ok())
}

/// Combina fecha y hora opcional (por defecto 10:00)
pub fn parse_date_time(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = match time {
        Some(t) if !t.trim().is_empty() => parse_time(t)?,
        _ => parse_time(DEFAULT_HANDOVER_TIME)?,
    };
    Some(date.and_time(time))
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(error_with_message("iso_date", "La fecha debe tener formato YYYY-MM-DD")),
    }
}

pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    if TIME_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(error_with_message("time", "La hora debe tener formato HH:MM"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("not_blank", "El campo es requerido"));
    }
    Ok(())
}

/// Contraseña fuerte: mínimo 8 caracteres con minúscula, mayúscula, dígito
/// y uno de `@$!%*?&#`
pub fn validate_strong_password(value: &str) -> Result<(), ValidationError> {
    let long_enough = value.chars().count() >= 8;
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if long_enough && has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err(error_with_message(
            "strong_password",
            "La contraseña debe tener al menos 8 caracteres, mayúscula, minúscula, número y carácter especial",
        ))
    }
}

/// Número de tarjeta: 12-19 dígitos, se toleran espacios y guiones
pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    let digits = card_digits(value);
    let only_allowed = value.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    if only_allowed && (12..=19).contains(&digits.len()) {
        Ok(())
    } else {
        Err(error_with_message("card_number", "El número de tarjeta debe tener entre 12 y 19 dígitos"))
    }
}

pub fn card_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    match value {
        "TRY" | "USD" | "EUR" => Ok(()),
        _ => Err(error_with_message("currency", "Moneda no soportada (TRY, USD, EUR)")),
    }
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if allowed_values.contains(&value) {
        return Ok(());
    }
    let mut error = ValidationError::new("enum");
    error.add_param(Cow::Borrowed("value"), &value);
    error.add_param(Cow::Borrowed("allowed_values"), &allowed_values);
    error.message = Some(Cow::Owned(format!(
        "Valor '{}' no permitido. Permitidos: {}",
        value,
        allowed_values.join(", ")
    )));
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("0555 123 45 67"));
        assert!(PHONE_REGEX.is_match("+90 (555) 123-4567"));
        assert!(!PHONE_REGEX.is_match("12345"));
        assert!(!PHONE_REGEX.is_match("0555abc4567"));
    }

    #[test]
    fn test_parse_date_accepts_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(parse_date("2025-07-01"), Some(expected));
        assert_eq!(parse_date("2025-07-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date("01/07/2025"), None);
    }

    #[test]
    fn test_parse_date_time_defaults_to_handover_time() {
        let dt = parse_date_time("2025-07-01", None).unwrap();
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let dt = parse_date_time("2025-07-01", Some("14:30")).unwrap();
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert!(parse_date_time("2025-07-01", Some("25:00")).is_none());
    }

    #[test]
    fn test_strong_password() {
        assert!(validate_strong_password("Secreta#2025").is_ok());
        assert!(validate_strong_password("secreta#2025").is_err());
        assert!(validate_strong_password("Secreta2025").is_err());
        assert!(validate_strong_password("S#2a").is_err());
    }

    #[test]
    fn test_card_number() {
        assert!(validate_card_number("4111 1111 1111 1111").is_ok());
        assert!(validate_card_number("4111").is_err());
        assert!(validate_card_number("4111-1111-1111-111x").is_err());
        assert_eq!(card_digits("4111 1111-1111 1111"), "4111111111111111");
    }

    #[test]
    fn test_validate_enum() {
        assert!(validate_enum("airport", &["airport", "office"]).is_ok());
        let err = validate_enum("port", &["airport", "office"]).unwrap_err();
        assert_eq!(err.code, "enum");
    }
}
