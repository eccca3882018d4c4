//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema SQLite de `migrations/`.

pub mod admin_user;
pub mod customer;
pub mod location;
pub mod payment;
pub mod quick_reservation;
pub mod quotation;
pub mod reservation;
pub mod setting;
pub mod vehicle;
pub mod visitor;
