//! Servicio de autenticación
//!
//! Login de administradores (con el acceso reservado de `root`), alta inicial,
//! cambio de contraseña y cuentas de clientes.

use bcrypt::{hash, verify};
use sqlx::SqlitePool;

use crate::dto::auth_dto::{LoginResponse, SessionUser};
use crate::models::admin_user::{AdminUser, ROOT_USERNAME};
use crate::models::customer::Customer;
use crate::repositories::admin_user_repository::AdminUserRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig, Role};

pub const BCRYPT_COST: u32 = 10;

const INVALID_ADMIN_CREDENTIALS: &str = "Usuario o contraseña incorrectos";
const INVALID_CUSTOMER_CREDENTIALS: &str = "Email o contraseña incorrectos";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

/// Un hash corrupto cuenta como contraseña incorrecta
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            log::warn!("⚠️ Hash de contraseña ilegible: {}", e);
            false
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService {
    admins: AdminUserRepository,
    customers: CustomerRepository,
    jwt: JwtConfig,
    root_password_hash: String,
}

impl AuthService {
    pub fn new(pool: SqlitePool, jwt: JwtConfig, root_password_hash: String) -> Self {
        Self {
            admins: AdminUserRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool),
            jwt,
            root_password_hash,
        }
    }

    /// Autentica un administrador. `root` solo se valida contra el hash
    /// configurado y nunca contra la tabla `admin_users`.
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let username = username.trim();

        if username == ROOT_USERNAME {
            return self.root_login(password);
        }

        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_ADMIN_CREDENTIALS.to_string()))?;

        if !verify_password(password, &admin.password_hash) {
            return Err(AppError::Unauthorized(INVALID_ADMIN_CREDENTIALS.to_string()));
        }

        let token = generate_token(
            admin.id,
            Some(admin.username.clone()),
            admin.email.clone(),
            Role::Admin,
            &self.jwt,
        )?;

        if let Err(e) = self.admins.touch_last_login(admin.id).await {
            log::warn!("⚠️ No se pudo registrar el último acceso de {}: {}", admin.username, e);
        }

        log::info!("✅ Login de administrador: {}", admin.username);
        Ok(LoginResponse::success(token, admin_session(&admin)))
    }

    fn root_login(&self, password: &str) -> Result<LoginResponse, AppError> {
        if !verify_password(password, &self.root_password_hash) {
            log::warn!("⚠️ Intento fallido de acceso root");
            return Err(AppError::Unauthorized(INVALID_ADMIN_CREDENTIALS.to_string()));
        }

        let token = generate_token(0, Some(ROOT_USERNAME.to_string()), None, Role::SuperAdmin, &self.jwt)?;
        log::warn!("⚠️ Acceso root concedido");

        Ok(LoginResponse::success(
            token,
            SessionUser {
                id: 0,
                username: Some(ROOT_USERNAME.to_string()),
                email: None,
                full_name: None,
                role: Role::SuperAdmin,
            },
        ))
    }

    /// Crea el primer administrador; solo funciona con la tabla vacía
    pub async fn setup(&self, username: &str, password: &str, email: &str) -> Result<AdminUser, AppError> {
        if self.admins.count().await? > 0 {
            return Err(AppError::Forbidden(
                "Ya existe un administrador. Este endpoint solo sirve para la instalación inicial".to_string(),
            ));
        }

        let admin = self.create_admin(username, password, Some(email)).await?;
        log::info!("✅ Primer administrador creado: {}", admin.username);
        Ok(admin)
    }

    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<AdminUser, AppError> {
        let username = username.trim();
        if username == ROOT_USERNAME {
            return Err(AppError::Conflict("El nombre de usuario está reservado".to_string()));
        }
        if self.admins.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("El nombre de usuario ya está en uso".to_string()));
        }

        let password_hash = hash_password(password)?;
        let email = email.map(normalize_email);
        self.admins.create(username, &password_hash, email.as_deref()).await
    }

    pub async fn change_password(
        &self,
        admin_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Solo las cuentas de administrador pueden cambiar contraseña".to_string()))?;

        if !verify_password(old_password, &admin.password_hash) {
            return Err(AppError::Unauthorized("La contraseña actual es incorrecta".to_string()));
        }

        let password_hash = hash_password(new_password)?;
        self.admins.update(admin.id, None, None, Some(&password_hash)).await?;
        log::info!("✅ Contraseña cambiada: {}", admin.username);
        Ok(())
    }

    pub async fn register_customer(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<LoginResponse, AppError> {
        let email = normalize_email(email);
        if self.customers.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Este email ya está registrado".to_string()));
        }

        let password_hash = hash_password(password)?;
        let customer = self
            .customers
            .create_with_password(full_name.trim(), &email, phone.trim(), &password_hash)
            .await?;

        log::info!("✅ Cliente registrado: {}", customer.email);
        self.customer_session(&customer)
    }

    pub async fn customer_login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let email = normalize_email(email);
        let customer = self
            .customers
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CUSTOMER_CREDENTIALS.to_string()))?;

        // Los clientes creados desde un pago no tienen contraseña
        let valid = customer
            .password_hash
            .as_deref()
            .map(|stored| verify_password(password, stored))
            .unwrap_or(false);

        if !valid {
            return Err(AppError::Unauthorized(INVALID_CUSTOMER_CREDENTIALS.to_string()));
        }

        self.customer_session(&customer)
    }

    fn customer_session(&self, customer: &Customer) -> Result<LoginResponse, AppError> {
        let token = generate_token(customer.id, None, Some(customer.email.clone()), Role::Customer, &self.jwt)?;
        Ok(LoginResponse::success(
            token,
            SessionUser {
                id: customer.id,
                username: None,
                email: Some(customer.email.clone()),
                full_name: customer.full_name.clone(),
                role: Role::Customer,
            },
        ))
    }
}

fn admin_session(admin: &AdminUser) -> SessionUser {
    SessionUser {
        id: admin.id,
        username: Some(admin.username.clone()),
        email: admin.email.clone(),
        full_name: None,
        role: Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;
    use crate::utils::jwt::verify_token;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "auth-service-tests".to_string(),
            admin_expiration: chrono::Duration::hours(24),
            customer_expiration: chrono::Duration::days(30),
        }
    }

    async fn service(root_password: &str) -> (DatabaseConnection, AuthService) {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let root_hash = hash(root_password, 4).unwrap();
        let service = AuthService::new(db.pool().clone(), jwt(), root_hash);
        (db, service)
    }

    #[tokio::test]
    async fn test_admin_login_issues_admin_token() {
        let (_db, auth) = service("Root#Pass1").await;
        auth.setup("operador", "Operador#1", "op@rentcar.test").await.unwrap();

        let response = auth.admin_login("operador", "Operador#1").await.unwrap();
        let claims = verify_token(&response.token, &jwt()).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.username.as_deref(), Some("operador"));

        let wrong = auth.admin_login("operador", "Yanlis#123").await;
        assert!(matches!(wrong, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_setup_only_once() {
        let (_db, auth) = service("Root#Pass1").await;
        auth.setup("operador", "Operador#1", "op@rentcar.test").await.unwrap();
        let again = auth.setup("otro_admin", "Operador#1", "otro@rentcar.test").await;
        assert!(matches!(again, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_root_row_is_ignored() {
        let (db, auth) = service("Root#Pass1").await;
        // Una fila "root" insertada a mano nunca concede acceso
        let row_hash = hash("Tabla#Root1", 4).unwrap();
        AdminUserRepository::new(db.pool().clone())
            .create("root", &row_hash, None)
            .await
            .unwrap();

        let via_row = auth.admin_login("root", "Tabla#Root1").await;
        assert!(matches!(via_row, Err(AppError::Unauthorized(_))));

        let via_hash = auth.admin_login("root", "Root#Pass1").await.unwrap();
        assert_eq!(via_hash.user.id, 0);
        assert_eq!(via_hash.user.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_root_name_is_reserved() {
        let (_db, auth) = service("Root#Pass1").await;
        let result = auth.create_admin("root", "Operador#1", None).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_change_password() {
        let (_db, auth) = service("Root#Pass1").await;
        let admin = auth.setup("operador", "Operador#1", "op@rentcar.test").await.unwrap();

        let wrong = auth.change_password(admin.id, "yanlis-sifre", "Yeni#Sifre2").await;
        assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

        auth.change_password(admin.id, "Operador#1", "Yeni#Sifre2").await.unwrap();
        assert!(auth.admin_login("operador", "Operador#1").await.is_err());
        assert!(auth.admin_login("operador", "Yeni#Sifre2").await.is_ok());

        let root = auth.change_password(0, "Root#Pass1", "Yeni#Sifre2").await;
        assert!(matches!(root, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_customer_register_and_login() {
        let (_db, auth) = service("Root#Pass1").await;
        let registered = auth
            .register_customer("Ada Lovelace", "Ada@Example.com", "0555 123 45 67", "gizli123")
            .await
            .unwrap();
        let claims = verify_token(&registered.token, &jwt()).unwrap();
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));

        assert!(auth.customer_login("ada@example.com", "gizli123").await.is_ok());
        assert!(matches!(
            auth.customer_login("ada@example.com", "yanlis").await,
            Err(AppError::Unauthorized(_))
        ));

        let duplicate = auth
            .register_customer("Ada", "ada@example.com", "0555 123 45 67", "gizli123")
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }
}
