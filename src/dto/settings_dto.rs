use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::setting::{Setting, DISCOUNT_RATE_KEY, VAT_RATE_KEY};
use crate::services::pricing::parse_rate;
use crate::utils::errors::{validation_error, AppError, FieldError};
use crate::utils::validation::SETTING_KEY_REGEX;

/// Ajustes como objeto plano `clave -> valor`
pub type SettingsMap = BTreeMap<String, String>;

pub fn settings_to_map(settings: Vec<Setting>) -> SettingsMap {
    settings.into_iter().map(|s| (s.key, s.value)).collect()
}

/// Cuerpo de `PUT /api/settings`: cualquier objeto JSON con valores escalares
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SettingsUpdateRequest(pub Map<String, Value>);

impl SettingsUpdateRequest {
    /// Pares listos para guardar; números y booleanos se guardan como texto.
    /// `vatRate` y `discountRate` deben ser porcentajes entre 0 y 100.
    pub fn into_entries(self) -> Result<Vec<(String, String)>, AppError> {
        if self.0.is_empty() {
            return Err(validation_error("settings", "required", "No se enviaron ajustes"));
        }

        let mut errors = Vec::new();
        let mut entries = Vec::with_capacity(self.0.len());

        for (key, value) in self.0 {
            if !SETTING_KEY_REGEX.is_match(&key) {
                errors.push(FieldError::new(&key, "setting_key", "Clave de ajuste no válida"));
                continue;
            }
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    errors.push(FieldError::new(&key, "setting_value", "El valor debe ser texto, número o booleano"));
                    continue;
                }
            };
            if (key == VAT_RATE_KEY || key == DISCOUNT_RATE_KEY) && parse_rate(&text).is_none() {
                errors.push(FieldError::new(&key, "rate", "La tasa debe ser un número entre 0 y 100"));
                continue;
            }
            entries.push((key, text));
        }

        if !errors.is_empty() {
            return Err(AppError::FieldErrors(errors));
        }
        Ok(entries)
    }
}
