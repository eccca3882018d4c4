//! Services module
//!
//! Este módulo contiene la lógica de negocio que no pertenece a un solo
//! repositorio: precios, autenticación, geolocalización, copias de seguridad
//! y la consola de base de datos.

pub mod auth_service;
pub mod backup_service;
pub mod db_admin_service;
pub mod geolocation_service;
pub mod pricing;
pub mod user_agent;

pub use auth_service::AuthService;
pub use backup_service::BackupService;
pub use db_admin_service::DbAdminService;
pub use geolocation_service::{GeoLocation, GeoLocator, IpApiGeoLocator};
