//! Consola de base de datos para el superusuario
//!
//! Las filas se devuelven como objetos JSON columna -> valor.

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool};

use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::TABLE_NAME_REGEX;

const TABLE_ROW_LIMIT: i64 = 100;

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum QueryOutcome {
    Select { data: Vec<Value> },
    Execute {
        changes: u64,
        #[serde(rename = "lastID")]
        last_id: i64,
    },
}

/// Convierte una columna SQLite a JSON probando los tipos en orden
fn column_value(row: &SqliteRow, index: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return v
            .map(|bytes| Value::from(format!("<blob {} bytes>", bytes.len())))
            .unwrap_or(Value::Null);
    }
    Value::Null
}

pub fn row_to_json(row: &SqliteRow) -> Value {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), column_value(row, index));
    }
    Value::Object(object)
}

fn is_select(query: &str) -> bool {
    query
        .split_whitespace()
        .next()
        .map(|word| word.eq_ignore_ascii_case("SELECT") || word.eq_ignore_ascii_case("WITH") || word.eq_ignore_ascii_case("PRAGMA"))
        .unwrap_or(false)
}

pub struct DbAdminService {
    pool: SqlitePool,
}

impl DbAdminService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn tables(&self) -> Result<Vec<String>, AppError> {
        let tables = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tables)
    }

    /// Últimas filas de una tabla existente
    pub async fn table_rows(&self, table: &str) -> Result<Vec<Value>, AppError> {
        if !TABLE_NAME_REGEX.is_match(table) {
            return Err(validation_error("tableName", "table_name", "Nombre de tabla no válido"));
        }
        if !self.tables().await?.iter().any(|t| t == table) {
            return Err(AppError::NotFound(format!("Tabla '{}' no encontrada", table)));
        }

        // El nombre ya está validado contra sqlite_master
        let sql = format!("SELECT * FROM \"{}\" ORDER BY rowid DESC LIMIT ?", table);
        let rows = sqlx::query(&sql)
            .bind(TABLE_ROW_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_json).collect())
    }

    /// Ejecuta SQL arbitrario. Los errores de SQLite vuelven como 400 para
    /// que el operador vea qué falló.
    pub async fn run_query(&self, query: &str) -> Result<QueryOutcome, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(validation_error("query", "required", "La consulta es requerida"));
        }

        log::warn!("⚠️ Consulta root: {}", query);

        if is_select(query) {
            let rows = sqlx::query(query)
                .fetch_all(&self.pool)
                .await
                .map_err(query_error)?;
            return Ok(QueryOutcome::Select {
                data: rows.iter().map(row_to_json).collect(),
            });
        }

        let result = sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(QueryOutcome::Execute {
            changes: result.rows_affected(),
            last_id: result.last_insert_rowid(),
        })
    }
}

fn query_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db_err) => AppError::BadRequest(db_err.message().to_string()),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;

    async fn service() -> (DatabaseConnection, DbAdminService) {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let service = DbAdminService::new(db.pool().clone());
        (db, service)
    }

    #[tokio::test]
    async fn test_tables_and_rows() {
        let (_db, service) = service().await;
        let tables = service.tables().await.unwrap();
        assert!(tables.contains(&"vehicles".to_string()));

        service
            .run_query("INSERT INTO settings (key, value) VALUES ('siteName', 'Rentcar')")
            .await
            .unwrap();
        let rows = service.table_rows("settings").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["key"], "siteName");
        assert_eq!(rows[0]["value"], "Rentcar");
    }

    #[tokio::test]
    async fn test_table_name_is_checked() {
        let (_db, service) = service().await;
        assert!(matches!(
            service.table_rows("vehicles; DROP TABLE vehicles").await,
            Err(AppError::FieldErrors(_))
        ));
        assert!(matches!(service.table_rows("nope").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_select_and_execute() {
        let (_db, service) = service().await;
        let outcome = service
            .run_query("INSERT INTO settings (key, value) VALUES ('a', '1'), ('b', '2')")
            .await
            .unwrap();
        assert!(matches!(outcome, QueryOutcome::Execute { changes: 2, .. }));

        let outcome = service.run_query("select key from settings order by key").await.unwrap();
        match outcome {
            QueryOutcome::Select { data } => {
                assert_eq!(data.len(), 2);
                assert_eq!(data[0]["key"], "a");
            }
            other => panic!("se esperaba SELECT: {:?}", other),
        }

        assert!(matches!(
            service.run_query("SELEC nada").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
