use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::admin_user::AdminUser;
use crate::utils::errors::AppError;

const SELECT_ADMIN: &str = r#"
    SELECT id, username, password_hash, email, created_at, updated_at, last_login
    FROM admin_users
"#;

pub struct AdminUserRepository {
    pool: SqlitePool,
}

impl AdminUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn find_all(&self) -> Result<Vec<AdminUser>, AppError> {
        let users = sqlx::query_as::<_, AdminUser>(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_ADMIN
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(&format!("{} WHERE id = ?", SELECT_ADMIN))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(&format!("{} WHERE username = ?", SELECT_ADMIN))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<AdminUser, AppError> {
        let id = sqlx::query(
            "INSERT INTO admin_users (username, password_hash, email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Usuario recién creado no encontrado".to_string()))
    }

    /// Actualización parcial; `None` deja el valor actual
    pub async fn update(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE admin_users
            SET username = COALESCE(?, username),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
