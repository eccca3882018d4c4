use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::reservation::{NewReservation, Reservation, ReservationStatus};
use crate::utils::errors::AppError;

const SELECT_RESERVATION: &str = r#"
    SELECT r.id, r.full_name, r.email, r.phone, r.pickup_location, r.dropoff_location,
           r.pickup_date, r.pickup_time, r.dropoff_date, r.dropoff_time, r.vehicle_id,
           r.customer_id, r.different_dropoff, r.special_requests, r.status, r.total_price,
           r.created_at,
           v.model AS vehicle_name, v.image AS vehicle_image,
           c.full_name AS customer_name
    FROM reservations r
    LEFT JOIN vehicles v ON v.id = r.vehicle_id
    LEFT JOIN customers c ON c.id = r.customer_id
"#;

pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserta dentro de una conexión o transacción existente
    pub async fn insert(conn: &mut SqliteConnection, reservation: &NewReservation) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO reservations (
                full_name, email, phone, pickup_location, dropoff_location,
                pickup_date, pickup_time, dropoff_date, dropoff_time,
                vehicle_id, customer_id, different_dropoff, special_requests,
                status, total_price, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reservation.full_name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(&reservation.pickup_location)
        .bind(&reservation.dropoff_location)
        .bind(&reservation.pickup_date)
        .bind(&reservation.pickup_time)
        .bind(&reservation.dropoff_date)
        .bind(&reservation.dropoff_time)
        .bind(&reservation.vehicle_id)
        .bind(reservation.customer_id)
        .bind(reservation.different_dropoff())
        .bind(&reservation.special_requests)
        .bind(reservation.status)
        .bind(reservation.total_price)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_status(conn: &mut SqliteConnection, id: i64) -> Result<Option<ReservationStatus>, AppError> {
        let status = sqlx::query_scalar::<_, ReservationStatus>("SELECT status FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(status)
    }

    pub async fn set_status(conn: &mut SqliteConnection, id: i64, status: ReservationStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE reservations SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn create(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        let mut conn = self.pool.acquire().await?;
        let id = Self::insert(&mut conn, reservation).await?;
        drop(conn);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Reserva recién creada no encontrada".to_string()))
    }

    pub async fn find_all(&self) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "{} ORDER BY r.created_at DESC, r.id DESC",
            SELECT_RESERVATION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!("{} WHERE r.id = ?", SELECT_RESERVATION))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reservation)
    }

    pub async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "{} WHERE r.customer_id = ? ORDER BY r.created_at DESC, r.id DESC",
            SELECT_RESERVATION
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn update_status_and_price(
        &self,
        id: i64,
        status: ReservationStatus,
        total_price: Option<f64>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = ?, total_price = COALESCE(?, total_price) WHERE id = ?",
        )
        .bind(status)
        .bind(total_price)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
