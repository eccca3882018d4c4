use sqlx::SqlitePool;

use crate::dto::reservation_dto::{CreateReservationRequest, ReservationCreatedResponse, UpdateReservationRequest};
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::settings_repository::SettingsRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::pricing::{self, PriceBreakdown};
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::parse_date_time;

pub struct ReservationController {
    reservations: ReservationRepository,
    vehicles: VehicleRepository,
    settings: SettingsRepository,
}

/// Convierte un texto de estado, 400 si no es uno conocido
pub fn parse_reservation_status(status: &str) -> Result<ReservationStatus, AppError> {
    status
        .parse::<ReservationStatus>()
        .map_err(|msg| validation_error("status", "enum", msg))
}

pub fn ensure_transition(current: ReservationStatus, next: ReservationStatus) -> Result<(), AppError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "No se puede pasar de '{}' a '{}'",
            current, next
        )))
    }
}

impl ReservationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reservations: ReservationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool),
        }
    }

    /// Crea la reserva. El total se calcula en el servidor cuando el vehículo
    /// tiene un precio diario legible; si no, se usa el enviado.
    pub async fn create(&self, request: CreateReservationRequest) -> Result<ReservationCreatedResponse, AppError> {
        let pickup = parse_date_time(&request.pickup_date, Some(&request.pickup_time))
            .ok_or_else(|| validation_error("pickupDate", "iso_date", "Fecha de recogida no válida"))?;
        let dropoff = parse_date_time(&request.dropoff_date, Some(&request.dropoff_time))
            .ok_or_else(|| validation_error("dropoffDate", "iso_date", "Fecha de devolución no válida"))?;
        let days = pricing::rental_days(pickup, dropoff)?;

        let breakdown = self.server_price(request.vehicle().as_deref(), days).await?;
        let total_price = breakdown
            .as_ref()
            .map(|b| b.total_price)
            .or(request.total_price);

        let reservation = self
            .reservations
            .create(&request.into_new_reservation(total_price))
            .await?;

        log::info!("📅 Nueva reserva #{} ({} días)", reservation.id, days);
        Ok(ReservationCreatedResponse {
            id: reservation.id,
            status: reservation.status,
            total_price: reservation.total_price,
            pricing: breakdown,
        })
    }

    async fn server_price(&self, vehicle_id: Option<&str>, days: i64) -> Result<Option<PriceBreakdown>, AppError> {
        let daily_price = match vehicle_id {
            Some(id) => self
                .vehicles
                .find_by_id(id)
                .await?
                .and_then(|vehicle| vehicle.daily_price()),
            None => None,
        };

        match daily_price {
            Some(daily) => {
                let rates = self.settings.rates().await?;
                Ok(Some(pricing::calculate(days, daily, rates)?))
            }
            None => Ok(None),
        }
    }

    /// Listado completo o filtrado por `?id=`
    pub async fn list(&self, id: Option<i64>) -> Result<Vec<Reservation>, AppError> {
        match id {
            Some(id) => Ok(self.reservations.find_by_id(id).await?.into_iter().collect()),
            None => self.reservations.find_all().await,
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Reservation, AppError> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reserva", id))
    }

    pub async fn update(&self, id: i64, request: UpdateReservationRequest) -> Result<Reservation, AppError> {
        let next = parse_reservation_status(&request.status)?;
        let current = self.get_by_id(id).await?;
        ensure_transition(current.status, next)?;

        self.reservations
            .update_status_and_price(id, next, request.total_price)
            .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.reservations.delete(id).await? {
            return Err(not_found_error("Reserva", id));
        }
        Ok(())
    }
}
