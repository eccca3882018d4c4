use sqlx::SqlitePool;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::models::admin_user::{AdminUser, ROOT_USERNAME};
use crate::repositories::admin_user_repository::AdminUserRepository;
use crate::services::auth_service::{hash_password, normalize_email, AuthService};
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    repository: AdminUserRepository,
    auth: AuthService,
}

impl UserController {
    pub fn new(pool: SqlitePool, auth: AuthService) -> Self {
        Self {
            repository: AdminUserRepository::new(pool),
            auth,
        }
    }

    pub async fn list(&self) -> Result<Vec<AdminUser>, AppError> {
        self.repository.find_all().await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<AdminUser, AppError> {
        let admin = self
            .auth
            .create_admin(&request.username, &request.password, request.email.as_deref())
            .await?;
        log::info!("✅ Administrador creado: {}", admin.username);
        Ok(admin)
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<AdminUser, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))?;

        let username = request.username.as_deref().map(str::trim);
        if let Some(username) = username {
            if username == ROOT_USERNAME {
                return Err(AppError::Conflict("El nombre de usuario está reservado".to_string()));
            }
            if username != current.username {
                if let Some(other) = self.repository.find_by_username(username).await? {
                    if other.id != id {
                        return Err(AppError::Conflict("El nombre de usuario ya está en uso".to_string()));
                    }
                }
            }
        }

        let email = request.email.as_deref().map(normalize_email);
        let password_hash = match request.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        self.repository
            .update(id, username, email.as_deref(), password_hash.as_deref())
            .await?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))
    }

    pub async fn delete(&self, id: i64, current_user_id: i64) -> Result<(), AppError> {
        if id == current_user_id {
            return Err(AppError::BadRequest("No puedes eliminar tu propia cuenta".to_string()));
        }
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Usuario", id));
        }
        log::info!("🗑️ Administrador eliminado: {}", id);
        Ok(())
    }
}
