use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::location::{Location, LocationType};
use crate::repositories::location_repository::LocationFields;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_enum, validate_not_blank};

fn validate_location_type(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &LocationType::VALUES)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub region: String,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub name: String,
    #[validate(custom = "validate_not_blank", length(max = 20))]
    pub code: String,
    #[serde(rename = "type")]
    #[validate(custom = "validate_location_type")]
    pub location_type: String,
    pub is_active: bool,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            region: String::new(),
            name: String::new(),
            code: String::new(),
            location_type: String::new(),
            is_active: true,
        }
    }
}

impl TryFrom<LocationRequest> for LocationFields {
    type Error = AppError;

    fn try_from(request: LocationRequest) -> Result<Self, Self::Error> {
        let location_type = request
            .location_type
            .parse::<LocationType>()
            .map_err(|msg| validation_error("type", "enum", msg))?;

        Ok(Self {
            region: request.region.trim().to_string(),
            name: request.name.trim().to_string(),
            code: request.code.trim().to_uppercase(),
            location_type,
            is_active: request.is_active,
        })
    }
}

/// Ubicaciones agrupadas por región, en orden alfabético
pub type GroupedLocations = BTreeMap<String, Vec<Location>>;

pub fn group_by_region(locations: Vec<Location>) -> GroupedLocations {
    let mut grouped = GroupedLocations::new();
    for location in locations {
        grouped.entry(location.region.clone()).or_default().push(location);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_must_be_known() {
        let request = LocationRequest {
            region: "İstanbul".to_string(),
            name: "Sabiha Gökçen".to_string(),
            code: "saw".to_string(),
            location_type: "harbour".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = LocationRequest {
            location_type: "airport".to_string(),
            ..request
        };
        assert!(request.validate().is_ok());
        let fields = LocationFields::try_from(request).unwrap();
        assert_eq!(fields.code, "SAW");
        assert_eq!(fields.location_type, LocationType::Airport);
        assert!(fields.is_active);
    }
}
