use sqlx::SqlitePool;

use crate::dto::pricing_dto::QuoteRequest;
use crate::repositories::settings_repository::SettingsRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::pricing::{self, PriceBreakdown};
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::parse_date_time;

pub struct PricingController {
    vehicles: VehicleRepository,
    settings: SettingsRepository,
}

impl PricingController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool),
        }
    }

    /// Vista previa con las tasas actuales del sitio. El precio del vehículo
    /// tiene prioridad sobre `dailyPrice`.
    pub async fn quote(&self, request: QuoteRequest) -> Result<PriceBreakdown, AppError> {
        let pickup = parse_date_time(&request.pickup_date, request.pickup_time.as_deref())
            .ok_or_else(|| validation_error("pickupDate", "iso_date", "Fecha de recogida no válida"))?;
        let dropoff = parse_date_time(&request.dropoff_date, request.dropoff_time.as_deref())
            .ok_or_else(|| validation_error("dropoffDate", "iso_date", "Fecha de devolución no válida"))?;

        let vehicle_id = request
            .vehicle_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let vehicle_price = match vehicle_id {
            Some(id) => {
                let vehicle = self
                    .vehicles
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehículo", id))?;
                vehicle.daily_price()
            }
            None => None,
        };

        let daily_price = vehicle_price.or(request.daily_price).ok_or_else(|| {
            validation_error("dailyPrice", "required", "Indica vehicleId o dailyPrice")
        })?;

        let rates = self.settings.rates().await?;
        Ok(pricing::quote(daily_price, pickup, dropoff, rates)?)
    }
}
