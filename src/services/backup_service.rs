//! Copias de seguridad de la base de datos
//!
//! Cada copia es un archivo SQLite consistente generado con `VACUUM INTO`
//! dentro del directorio configurado.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::utils::errors::{validation_error, AppError};

lazy_static! {
    static ref BACKUP_NAME_REGEX: Regex = Regex::new(r"^rentcar-backup-[A-Za-z0-9_-]+\.db$").unwrap();
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInfo {
    pub name: String,
    pub size: u64,
    pub size_label: String,
    pub modified: DateTime<Utc>,
}

fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn is_valid_backup_name(name: &str) -> bool {
    BACKUP_NAME_REGEX.is_match(name)
}

pub struct BackupService {
    pool: SqlitePool,
    dir: PathBuf,
}

impl BackupService {
    pub fn new(pool: SqlitePool, dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            dir: dir.into(),
        }
    }

    async fn info_for(path: &Path) -> Result<Option<BackupInfo>, AppError> {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if is_valid_backup_name(name) => name.to_string(),
            _ => return Ok(None),
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| AppError::Internal(format!("No se pudo leer {}: {}", name, e)))?;
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(Some(BackupInfo {
            name,
            size: metadata.len(),
            size_label: size_label(metadata.len()),
            modified,
        }))
    }

    pub async fn create(&self) -> Result<BackupInfo, AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("No se pudo crear el directorio de copias: {}", e)))?;

        let name = format!("rentcar-backup-{}.db", Utc::now().format("%Y-%m-%dT%H-%M-%S-%3f"));
        let path = self.dir.join(&name);
        let target = path
            .to_str()
            .ok_or_else(|| AppError::Internal("Ruta de copia no válida".to_string()))?
            .to_string();

        sqlx::query("VACUUM INTO ?")
            .bind(target)
            .execute(&self.pool)
            .await?;

        log::info!("✅ Copia creada: {}", name);
        Self::info_for(&path)
            .await?
            .ok_or_else(|| AppError::Internal("Copia recién creada no encontrada".to_string()))
    }

    /// Copias disponibles, la más reciente primero
    pub async fn list(&self) -> Result<Vec<BackupInfo>, AppError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Internal(format!("No se pudo listar las copias: {}", e))),
        };

        let mut backups = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Internal(format!("No se pudo listar las copias: {}", e)))?
        {
            if let Some(info) = Self::info_for(&entry.path()).await? {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.modified.cmp(&a.modified).then(b.name.cmp(&a.name)));
        Ok(backups)
    }

    /// Ruta de una copia existente; rechaza nombres fuera del patrón
    pub async fn path_for(&self, name: &str) -> Result<PathBuf, AppError> {
        if !is_valid_backup_name(name) {
            return Err(validation_error("filename", "backup_name", "Nombre de archivo no válido"));
        }

        let path = self.dir.join(name);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Ok(path),
            _ => Err(AppError::NotFound(format!("Copia '{}' no encontrada", name))),
        }
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, AppError> {
        let path = self.path_for(name).await?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| AppError::Internal(format!("No se pudo leer la copia: {}", e)))
    }

    pub async fn delete(&self, name: &str) -> Result<(), AppError> {
        let path = self.path_for(name).await?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Internal(format!("No se pudo borrar la copia: {}", e)))?;
        log::info!("🗑️ Copia borrada: {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;

    #[test]
    fn test_backup_names() {
        assert!(is_valid_backup_name("rentcar-backup-2025-07-01T10-00-00-000.db"));
        assert!(!is_valid_backup_name("../data.db"));
        assert!(!is_valid_backup_name("rentcar-backup-../../x.db"));
        assert!(!is_valid_backup_name("rentcar-backup-2025.zip"));
    }

    #[tokio::test]
    async fn test_create_list_read_delete() {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(db.pool().clone(), dir.path());

        assert!(service.list().await.unwrap().is_empty());

        let created = service.create().await.unwrap();
        assert!(created.size > 0);

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, created.name);

        let bytes = service.read(&created.name).await.unwrap();
        assert!(bytes.starts_with(b"SQLite format 3"));

        service.delete(&created.name).await.unwrap();
        assert!(matches!(service.read(&created.name).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete("data.db").await, Err(AppError::FieldErrors(_))));
    }
}
