use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::visitor::{NamedCount, NewVisit, Visitor};
use crate::utils::errors::AppError;

/// Columnas por las que se agrupan las estadísticas
#[derive(Debug, Clone, Copy)]
pub enum VisitorDimension {
    Device,
    Browser,
    Country,
}

impl VisitorDimension {
    fn column(&self) -> &'static str {
        match self {
            VisitorDimension::Device => "device",
            VisitorDimension::Browser => "browser",
            VisitorDimension::Country => "country",
        }
    }
}

pub struct VisitorRepository {
    pool: SqlitePool,
}

impl VisitorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, visit: &NewVisit) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO visitors (ip, user_agent, referrer, page_url, timestamp, device, browser, os, country, city)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&visit.ip)
        .bind(&visit.user_agent)
        .bind(&visit.referrer)
        .bind(&visit.page_url)
        .bind(Utc::now())
        .bind(&visit.device)
        .bind(&visit.browser)
        .bind(&visit.os)
        .bind(&visit.country)
        .bind(&visit.city)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    pub async fn count_total(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_unique_ips(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT ip) FROM visitors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitors WHERE timestamp >= ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn grouped(&self, dimension: VisitorDimension) -> Result<Vec<NamedCount>, AppError> {
        let sql = format!(
            "SELECT {col} AS name, COUNT(*) AS count FROM visitors GROUP BY {col} ORDER BY count DESC, name ASC",
            col = dimension.column()
        );
        let rows = sqlx::query_as::<_, NamedCount>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn latest(&self, limit: i64) -> Result<Vec<Visitor>, AppError> {
        let rows = sqlx::query_as::<_, Visitor>(
            r#"
            SELECT id, ip, user_agent, referrer, page_url, timestamp, device, browser, os, country, city
            FROM visitors
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM visitors").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
