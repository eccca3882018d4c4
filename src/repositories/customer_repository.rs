use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::customer::{Customer, CustomerProfile};
use crate::utils::errors::AppError;

const SELECT_CUSTOMER: &str = r#"
    SELECT id, full_name, email, phone, address_line, city, country, postal_code,
           password_hash, created_at, updated_at
    FROM customers
"#;

pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!("{} WHERE id = ?", SELECT_CUSTOMER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!("{} WHERE email = ?", SELECT_CUSTOMER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Alta de cliente con contraseña (email único, conflicto -> 409)
    pub async fn create_with_password(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
    ) -> Result<Customer, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO customers (full_name, email, phone, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Cliente recién creado no encontrado".to_string()))
    }

    /// Inserta o actualiza por email en una sola sentencia
    pub async fn upsert(&self, profile: &CustomerProfile) -> Result<Customer, AppError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO customers (full_name, email, phone, address_line, city, country, postal_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                full_name = COALESCE(excluded.full_name, customers.full_name),
                phone = COALESCE(excluded.phone, customers.phone),
                address_line = COALESCE(excluded.address_line, customers.address_line),
                city = COALESCE(excluded.city, customers.city),
                country = COALESCE(excluded.country, customers.country),
                postal_code = COALESCE(excluded.postal_code, customers.postal_code),
                updated_at = ?
            "#,
        )
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.address_line)
        .bind(&profile.city)
        .bind(&profile.country)
        .bind(&profile.postal_code)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_email(&profile.email)
            .await?
            .ok_or_else(|| AppError::Internal("Cliente no encontrado tras upsert".to_string()))
    }

    /// Busca por email o crea el cliente, dentro de la transacción del llamador
    pub async fn find_or_create(
        conn: &mut SqliteConnection,
        email: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<i64, AppError> {
        sqlx::query(
            r#"
            INSERT INTO customers (email, full_name, phone, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(full_name)
        .bind(phone)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM customers WHERE email = ?")
            .bind(email)
            .fetch_one(&mut *conn)
            .await?;

        Ok(id)
    }
}
