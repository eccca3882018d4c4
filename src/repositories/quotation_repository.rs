use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::quotation::{Quotation, QuotationStatus};
use crate::utils::errors::AppError;

const SELECT_QUOTATION: &str = r#"
    SELECT q.id, q.name, q.email, q.phone, q.vehicle_id, q.message, q.status, q.created_at,
           v.model AS vehicle_name
    FROM quotations q
    LEFT JOIN vehicles v ON v.id = q.vehicle_id
"#;

pub struct QuotationRepository {
    pool: SqlitePool,
}

impl QuotationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Quotation>, AppError> {
        let quotations = sqlx::query_as::<_, Quotation>(&format!(
            "{} ORDER BY q.created_at DESC, q.id DESC",
            SELECT_QUOTATION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotations)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Quotation>, AppError> {
        let quotation = sqlx::query_as::<_, Quotation>(&format!("{} WHERE q.id = ?", SELECT_QUOTATION))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quotation)
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        vehicle_id: &str,
        message: &str,
    ) -> Result<Quotation, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO quotations (name, email, phone, vehicle_id, message, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(vehicle_id)
        .bind(message)
        .bind(QuotationStatus::New)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Cotización recién creada no encontrada".to_string()))
    }

    pub async fn update_status(&self, id: i64, status: QuotationStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE quotations SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
