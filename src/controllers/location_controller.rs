use sqlx::SqlitePool;

use crate::dto::location_dto::{group_by_region, GroupedLocations, LocationRequest};
use crate::models::location::Location;
use crate::repositories::location_repository::{LocationFields, LocationRepository};
use crate::utils::errors::{not_found_error, AppError};

pub struct LocationController {
    repository: LocationRepository,
}

impl LocationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: LocationRepository::new(pool),
        }
    }

    /// Ubicaciones activas para los formularios públicos
    pub async fn list_active(&self) -> Result<Vec<Location>, AppError> {
        self.repository.find_active().await
    }

    pub async fn grouped(&self) -> Result<GroupedLocations, AppError> {
        Ok(group_by_region(self.repository.find_active().await?))
    }

    pub async fn list_all(&self) -> Result<Vec<Location>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Location, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Ubicación", id))
    }

    pub async fn create(&self, request: LocationRequest) -> Result<Location, AppError> {
        let fields = LocationFields::try_from(request)?;
        self.repository.create(&fields).await
    }

    pub async fn update(&self, id: i64, request: LocationRequest) -> Result<Location, AppError> {
        let fields = LocationFields::try_from(request)?;
        self.repository
            .update(id, &fields)
            .await?
            .ok_or_else(|| not_found_error("Ubicación", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Ubicación", id));
        }
        Ok(())
    }
}
