//! Data Transfer Objects
//!
//! Cuerpos de petición y respuesta de la API (JSON en camelCase).

pub mod auth_dto;
pub mod common_dto;
pub mod customer_dto;
pub mod db_admin_dto;
pub mod location_dto;
pub mod payment_dto;
pub mod pricing_dto;
pub mod quick_reservation_dto;
pub mod quotation_dto;
pub mod reservation_dto;
pub mod settings_dto;
pub mod user_dto;
pub mod vehicle_dto;
pub mod visitor_dto;

pub use common_dto::ApiResponse;
