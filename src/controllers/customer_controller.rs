use sqlx::SqlitePool;

use crate::dto::auth_dto::LoginResponse;
use crate::dto::customer_dto::{CustomerLoginRequest, CustomerMeResponse, CustomerRegisterRequest, CustomerUpsertRequest};
use crate::models::customer::{Customer, CustomerProfile};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::services::auth_service::AuthService;
use crate::utils::errors::{not_found_error, AppError};

pub struct CustomerController {
    customers: CustomerRepository,
    reservations: ReservationRepository,
    auth: AuthService,
}

impl CustomerController {
    pub fn new(pool: SqlitePool, auth: AuthService) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool),
            auth,
        }
    }

    pub async fn register(&self, request: CustomerRegisterRequest) -> Result<LoginResponse, AppError> {
        self.auth
            .register_customer(&request.full_name, &request.email, &request.phone, &request.password)
            .await
    }

    pub async fn login(&self, request: CustomerLoginRequest) -> Result<LoginResponse, AppError> {
        self.auth.customer_login(&request.email, &request.password).await
    }

    /// Crea o completa el perfil por email sin borrar datos existentes
    pub async fn upsert(&self, request: CustomerUpsertRequest) -> Result<Customer, AppError> {
        self.customers.upsert(&CustomerProfile::from(request)).await
    }

    pub async fn me(&self, customer_id: i64) -> Result<CustomerMeResponse, AppError> {
        let user = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", customer_id))?;
        let reservations = self.reservations.find_by_customer(customer_id).await?;

        Ok(CustomerMeResponse { user, reservations })
    }
}
