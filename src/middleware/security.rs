//! Bloqueo de rutas sensibles
//!
//! Se aplica antes del enrutado para que ni la API ni los estáticos sirvan
//! bases de datos, variables de entorno o metadatos del repositorio.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::utils::errors::AppError;

const BLOCKED_FRAGMENTS: &[&str] = &[".db", ".env", ".git", "Cargo.toml", "Cargo.lock"];

/// Las descargas de copias tienen su propia validación de nombre
const BACKUP_DOWNLOAD_PREFIX: &str = "/api/backups/";

pub fn is_sensitive_path(path: &str) -> bool {
    if path.starts_with(BACKUP_DOWNLOAD_PREFIX) && !path.contains("..") {
        return false;
    }
    BLOCKED_FRAGMENTS.iter().any(|fragment| path.contains(fragment))
}

pub async fn block_sensitive_paths(request: Request, next: Next) -> Result<Response, AppError> {
    let path = request.uri().path();
    if is_sensitive_path(path) {
        log::warn!("⚠️ Acceso bloqueado a ruta sensible: {}", path);
        return Err(AppError::Forbidden("Acceso denegado".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_paths() {
        assert!(is_sensitive_path("/data.db"));
        assert!(is_sensitive_path("/.env"));
        assert!(is_sensitive_path("/.git/config"));
        assert!(is_sensitive_path("/Cargo.toml"));
        assert!(is_sensitive_path("/api/backups/../data.db"));
        assert!(!is_sensitive_path("/api/backups/download/rentcar-backup-2025-07-01T10-00-00-000.db"));
        assert!(!is_sensitive_path("/index.html"));
        assert!(!is_sensitive_path("/api/vehicles"));
    }
}
