use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::payment::{NewPayment, Payment, PaymentStatus, MOCK_PROVIDER};
use crate::utils::errors::AppError;

const SELECT_PAYMENT: &str = r#"
    SELECT p.id, p.reservation_id, p.customer_id, p.provider, p.intent_id, p.status, p.amount,
           p.currency, p.card_brand, p.card_last4, p.card_holder, p.expiry_month, p.expiry_year,
           p.created_at,
           r.full_name AS reservation_name,
           c.full_name AS customer_name
    FROM payments p
    LEFT JOIN reservations r ON r.id = p.reservation_id
    LEFT JOIN customers c ON c.id = p.customer_id
"#;

pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(conn: &mut SqliteConnection, payment: &NewPayment) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO payments (
                reservation_id, customer_id, provider, intent_id, status, amount, currency,
                card_brand, card_last4, card_holder, expiry_month, expiry_year, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.reservation_id)
        .bind(payment.customer_id)
        .bind(MOCK_PROVIDER)
        .bind(&payment.intent_id)
        .bind(PaymentStatus::PendingManual)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.card.brand)
        .bind(&payment.card.last4)
        .bind(&payment.card.holder)
        .bind(&payment.card.expiry_month)
        .bind(&payment.card.expiry_year)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "{} ORDER BY p.created_at DESC, p.id DESC",
            SELECT_PAYMENT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(&format!("{} WHERE p.id = ?", SELECT_PAYMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
