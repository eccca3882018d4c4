use sqlx::SqlitePool;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

const SELECT_VEHICLE: &str = r#"
    SELECT id, model, price, deposit, status, image, passengers, fuel, transmission, category
    FROM vehicles
"#;

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!("{} ORDER BY rowid ASC", SELECT_VEHICLE))
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!("{} WHERE id = ?", SELECT_VEHICLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, model, price, deposit, status, image, passengers, fuel, transmission, category)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.model)
        .bind(&vehicle.price)
        .bind(&vehicle.deposit)
        .bind(&vehicle.status)
        .bind(&vehicle.image)
        .bind(vehicle.passengers)
        .bind(&vehicle.fuel)
        .bind(&vehicle.transmission)
        .bind(&vehicle.category)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&vehicle.id)
            .await?
            .ok_or_else(|| AppError::Internal("Vehículo recién creado no encontrado".to_string()))
    }

    /// Reemplaza todos los campos; `None` si el id no existe
    pub async fn update(&self, vehicle: &Vehicle) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET model = ?, price = ?, deposit = ?, status = ?, image = ?,
                passengers = ?, fuel = ?, transmission = ?, category = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.model)
        .bind(&vehicle.price)
        .bind(&vehicle.deposit)
        .bind(&vehicle.status)
        .bind(&vehicle.image)
        .bind(vehicle.passengers)
        .bind(&vehicle.fuel)
        .bind(&vehicle.transmission)
        .bind(&vehicle.category)
        .bind(&vehicle.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(&vehicle.id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
