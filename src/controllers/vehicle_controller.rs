use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleRequest;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))
    }

    pub async fn create(&self, request: VehicleRequest) -> Result<Vehicle, AppError> {
        // Sin id del cliente se genera uno
        let id = request
            .requested_id()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if self.repository.exists(&id).await? {
            return Err(AppError::Conflict(format!("Ya existe un vehículo con id '{}'", id)));
        }

        let vehicle = self.repository.create(&request.into_vehicle(id)).await?;
        log::info!("✅ Vehículo creado: {} ({})", vehicle.model, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, request: VehicleRequest) -> Result<Vehicle, AppError> {
        self.repository
            .update(&request.into_vehicle(id.to_string()))
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehículo", id));
        }
        log::info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }
}
