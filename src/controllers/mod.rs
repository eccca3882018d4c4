//! Controladores
//!
//! Reglas de negocio entre las rutas y los repositorios.

pub mod auth_controller;
pub mod customer_controller;
pub mod location_controller;
pub mod payment_controller;
pub mod pricing_controller;
pub mod quick_reservation_controller;
pub mod quotation_controller;
pub mod reservation_controller;
pub mod settings_controller;
pub mod user_controller;
pub mod vehicle_controller;
pub mod visitor_controller;
