use sqlx::SqlitePool;

use crate::models::setting::{Setting, DISCOUNT_RATE_KEY, VAT_RATE_KEY};
use crate::services::pricing::{self, Rates};
use crate::utils::errors::AppError;

pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Setting>, AppError> {
        let settings = sqlx::query_as::<_, Setting>("SELECT key, value FROM settings ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(settings)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Inserta o reemplaza todos los pares en una sola transacción.
    /// Si alguno falla no se aplica ninguno.
    pub async fn upsert_many(&self, entries: &[(String, String)]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value) VALUES (?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::warn!("⚠️ Ajuste '{}' rechazado, se revierte el lote: {}", key, e);
                e
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn insert_if_missing(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Tasas de IVA y descuento del sitio; valores ausentes o inválidos usan los por defecto
    pub async fn rates(&self) -> Result<Rates, AppError> {
        let defaults = Rates::default();
        let parse = |value: Option<String>, fallback: f64| {
            value.as_deref().and_then(pricing::parse_rate).unwrap_or(fallback)
        };

        Ok(Rates {
            vat_rate: parse(self.get(VAT_RATE_KEY).await?, defaults.vat_rate),
            discount_rate: parse(self.get(DISCOUNT_RATE_KEY).await?, defaults.discount_rate),
        })
    }
}
