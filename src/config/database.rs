//! Configuración de base de datos
//!
//! Este módulo maneja el pool de conexiones SQLite con SQLx.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:")
    }

    fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(false);

        // WAL no aplica a bases en memoria
        if self.is_memory() {
            Ok(options)
        } else {
            Ok(options.journal_mode(SqliteJournalMode::Wal))
        }
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<SqlitePool, sqlx::Error> {
        // Cada conexión en memoria es una base distinta: una sola conexión
        let (max, min) = if self.is_memory() {
            (1, 1)
        } else {
            (self.max_connections, self.min_connections)
        };

        SqlitePoolOptions::new()
            .max_connections(max)
            .min_connections(min)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(if self.is_memory() { None } else { Some(self.idle_timeout) })
            .max_lifetime(if self.is_memory() { None } else { Some(self.max_lifetime) })
            .connect_with(self.connect_options()?)
            .await
    }
}
