use sqlx::SqlitePool;

use crate::controllers::reservation_controller::{ensure_transition, parse_reservation_status};
use crate::dto::quick_reservation_dto::{CreateQuickReservationRequest, QuickReservationCreatedResponse};
use crate::models::quick_reservation::{NewQuickReservation, QuickReservation, PLACEHOLDER_EMAIL, PLACEHOLDER_LOCATION};
use crate::models::reservation::{NewReservation, ReservationStatus};
use crate::repositories::quick_reservation_repository::QuickReservationRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::settings_repository::SettingsRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::pricing;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::{parse_date_time, DEFAULT_HANDOVER_TIME};

pub struct QuickReservationController {
    pool: SqlitePool,
    repository: QuickReservationRepository,
    vehicles: VehicleRepository,
    settings: SettingsRepository,
}

impl QuickReservationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: QuickReservationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Recalcula el precio y guarda la reserva rápida junto con su reserva
    /// espejo en una sola transacción
    pub async fn create(&self, request: CreateQuickReservationRequest) -> Result<QuickReservationCreatedResponse, AppError> {
        let pickup = parse_date_time(&request.pickup_date, None)
            .ok_or_else(|| validation_error("pickupDate", "iso_date", "Fecha de recogida no válida"))?;
        let dropoff = parse_date_time(&request.dropoff_date, None)
            .ok_or_else(|| validation_error("dropoffDate", "iso_date", "Fecha de devolución no válida"))?;

        let vehicle_id = request.vehicle();
        let vehicle_price = match vehicle_id.as_deref() {
            Some(id) => self.vehicles.find_by_id(id).await?.and_then(|v| v.daily_price()),
            None => None,
        };
        let daily_price = vehicle_price.or(request.daily_price).ok_or_else(|| {
            validation_error("dailyPrice", "required", "No se pudo determinar el precio diario")
        })?;

        let rates = self.settings.rates().await?;
        let breakdown = pricing::quote(daily_price, pickup, dropoff, rates)?;

        let mut quick = NewQuickReservation {
            reservation_id: None,
            full_name: request.full_name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            pickup_date: request.pickup_date.trim().to_string(),
            dropoff_date: request.dropoff_date.trim().to_string(),
            vehicle_id: vehicle_id.clone(),
            pricing: breakdown.clone(),
            source: request.source(),
        };

        let mirror = NewReservation {
            full_name: quick.full_name.clone(),
            email: PLACEHOLDER_EMAIL.to_string(),
            phone: quick.phone.clone(),
            pickup_location: PLACEHOLDER_LOCATION.to_string(),
            dropoff_location: PLACEHOLDER_LOCATION.to_string(),
            pickup_date: quick.pickup_date.clone(),
            pickup_time: DEFAULT_HANDOVER_TIME.to_string(),
            dropoff_date: quick.dropoff_date.clone(),
            dropoff_time: DEFAULT_HANDOVER_TIME.to_string(),
            vehicle_id,
            customer_id: None,
            special_requests: Some(quick.summary_note()),
            status: ReservationStatus::New,
            total_price: Some(breakdown.total_price),
        };

        let mut tx = self.pool.begin().await?;
        let reservation_id = ReservationRepository::insert(&mut *tx, &mirror).await?;
        quick.reservation_id = Some(reservation_id);
        let id = QuickReservationRepository::insert(&mut *tx, &quick).await?;
        tx.commit().await?;

        log::info!(
            "⚡ Reserva rápida #{} (reserva #{}) total {}",
            id,
            reservation_id,
            breakdown.total_price
        );

        Ok(QuickReservationCreatedResponse {
            id,
            reservation_id,
            pricing: breakdown,
        })
    }

    pub async fn list(&self) -> Result<Vec<QuickReservation>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<QuickReservation, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reserva rápida", id))
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<QuickReservation, AppError> {
        let next = parse_reservation_status(status)?;
        let current = self.get_by_id(id).await?;
        ensure_transition(current.status, next)?;

        self.repository.update_status(id, next).await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Reserva rápida", id));
        }
        Ok(())
    }
}
