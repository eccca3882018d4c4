use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::location::{Location, LocationType};
use crate::utils::errors::AppError;

const SELECT_LOCATION: &str = r#"
    SELECT id, region, name, code, location_type, is_active, created_at
    FROM locations
"#;

/// Campos editables de una ubicación
#[derive(Debug, Clone)]
pub struct LocationFields {
    pub region: String,
    pub name: String,
    pub code: String,
    pub location_type: LocationType,
    pub is_active: bool,
}

pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "{} WHERE is_active = 1 ORDER BY region ASC, name ASC",
            SELECT_LOCATION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn find_all(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(&format!(
            "{} ORDER BY region ASC, name ASC",
            SELECT_LOCATION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(&format!("{} WHERE id = ?", SELECT_LOCATION))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    pub async fn create(&self, fields: &LocationFields) -> Result<Location, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO locations (region, name, code, location_type, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.region)
        .bind(&fields.name)
        .bind(&fields.code)
        .bind(fields.location_type)
        .bind(fields.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Ubicación recién creada no encontrada".to_string()))
    }

    /// Inserta solo si (región, nombre) no existe; devuelve si se insertó
    pub async fn insert_if_missing(&self, fields: &LocationFields) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO locations (region, name, code, location_type, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.region)
        .bind(&fields.name)
        .bind(&fields.code)
        .bind(fields.location_type)
        .bind(fields.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update(&self, id: i64, fields: &LocationFields) -> Result<Option<Location>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET region = ?, name = ?, code = ?, location_type = ?, is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.region)
        .bind(&fields.name)
        .bind(&fields.code)
        .bind(fields.location_type)
        .bind(fields.is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
