use sqlx::SqlitePool;

use crate::dto::settings_dto::{settings_to_map, SettingsMap, SettingsUpdateRequest};
use crate::repositories::settings_repository::SettingsRepository;
use crate::utils::errors::AppError;

pub struct SettingsController {
    repository: SettingsRepository,
}

impl SettingsController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: SettingsRepository::new(pool),
        }
    }

    pub async fn get_all(&self) -> Result<SettingsMap, AppError> {
        Ok(settings_to_map(self.repository.find_all().await?))
    }

    /// Guarda todos los pares o ninguno
    pub async fn update(&self, request: SettingsUpdateRequest) -> Result<SettingsMap, AppError> {
        let entries = request.into_entries()?;
        self.repository.upsert_many(&entries).await?;
        log::info!("⚙️ {} ajustes actualizados", entries.len());
        self.get_all().await
    }
}
