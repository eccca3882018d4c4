use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::quick_reservation::{NewQuickReservation, QuickReservation};
use crate::models::reservation::ReservationStatus;
use crate::utils::errors::AppError;

const SELECT_QUICK_RESERVATION: &str = r#"
    SELECT qr.id, qr.reservation_id, qr.full_name, qr.phone, qr.pickup_date, qr.dropoff_date,
           qr.vehicle_id, qr.days, qr.daily_price, qr.subtotal, qr.vat_rate, qr.vat_amount,
           qr.discount_rate, qr.discount_amount, qr.total_price, qr.source, qr.status, qr.created_at,
           v.model AS vehicle_name, v.price AS vehicle_price
    FROM quick_reservations qr
    LEFT JOIN vehicles v ON v.id = qr.vehicle_id
"#;

pub struct QuickReservationRepository {
    pool: SqlitePool,
}

impl QuickReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(conn: &mut SqliteConnection, quick: &NewQuickReservation) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO quick_reservations (
                reservation_id, full_name, phone, pickup_date, dropoff_date, vehicle_id,
                days, daily_price, subtotal, vat_rate, vat_amount, discount_rate,
                discount_amount, total_price, source, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quick.reservation_id)
        .bind(&quick.full_name)
        .bind(&quick.phone)
        .bind(&quick.pickup_date)
        .bind(&quick.dropoff_date)
        .bind(&quick.vehicle_id)
        .bind(quick.pricing.days)
        .bind(quick.pricing.daily_price)
        .bind(quick.pricing.subtotal)
        .bind(quick.pricing.vat_rate)
        .bind(quick.pricing.vat_amount)
        .bind(quick.pricing.discount_rate)
        .bind(quick.pricing.discount_amount)
        .bind(quick.pricing.total_price)
        .bind(&quick.source)
        .bind(ReservationStatus::New)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<QuickReservation>, AppError> {
        let rows = sqlx::query_as::<_, QuickReservation>(&format!(
            "{} ORDER BY qr.created_at DESC, qr.id DESC",
            SELECT_QUICK_RESERVATION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<QuickReservation>, AppError> {
        let row = sqlx::query_as::<_, QuickReservation>(&format!(
            "{} WHERE qr.id = ?",
            SELECT_QUICK_RESERVATION
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_status(&self, id: i64, status: ReservationStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE quick_reservations SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quick_reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
