use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_iso_date, validate_time};

// Vista previa de precio
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(length(max = 50))]
    pub vehicle_id: Option<String>,
    #[validate(range(min = 0.0, message = "El precio diario no puede ser negativo"))]
    pub daily_price: Option<f64>,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_iso_date")]
    pub dropoff_date: String,
    #[validate(custom = "validate_time")]
    pub pickup_time: Option<String>,
    #[validate(custom = "validate_time")]
    pub dropoff_time: Option<String>,
}
