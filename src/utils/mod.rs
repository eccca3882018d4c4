//! Utilidades compartidas: errores, JWT, validación e IP del cliente

pub mod client_ip;
pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
