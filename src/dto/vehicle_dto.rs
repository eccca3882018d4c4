use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{
    Vehicle, DEFAULT_CATEGORY, DEFAULT_FUEL, DEFAULT_IMAGE, DEFAULT_PASSENGERS, DEFAULT_STATUS, DEFAULT_TRANSMISSION,
};
use crate::utils::validation::validate_not_blank;

// Alta o edición de un vehículo desde el panel
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(length(max = 50, message = "El id no puede superar 50 caracteres"))]
    pub id: Option<String>,
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "El modelo no puede superar 100 caracteres")
    )]
    pub model: String,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub price: String,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub deposit: String,
    #[validate(length(max = 50))]
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub image: Option<String>,
    #[validate(range(min = 1, max = 60, message = "Número de pasajeros no válido"))]
    pub passengers: Option<i64>,
    #[validate(length(max = 50))]
    pub fuel: Option<String>,
    #[validate(length(max = 50))]
    pub transmission: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl VehicleRequest {
    /// Id enviado por el cliente, si no está vacío
    pub fn requested_id(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }

    /// Construye el vehículo completando los valores por defecto
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            model: self.model.trim().to_string(),
            price: self.price.trim().to_string(),
            deposit: self.deposit.trim().to_string(),
            status: or_default(self.status, DEFAULT_STATUS),
            image: or_default(self.image, DEFAULT_IMAGE),
            passengers: self.passengers.unwrap_or(DEFAULT_PASSENGERS),
            fuel: or_default(self.fuel, DEFAULT_FUEL),
            transmission: or_default(self.transmission, DEFAULT_TRANSMISSION),
            category: or_default(self.category, DEFAULT_CATEGORY),
        }
    }
}
