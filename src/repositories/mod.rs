//! Repositorios: acceso a datos con SQLx sobre SQLite

pub mod admin_user_repository;
pub mod customer_repository;
pub mod location_repository;
pub mod payment_repository;
pub mod quick_reservation_repository;
pub mod quotation_repository;
pub mod reservation_repository;
pub mod settings_repository;
pub mod vehicle_repository;
pub mod visitor_repository;
