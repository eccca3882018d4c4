use sqlx::SqlitePool;

use crate::dto::quotation_dto::{CreateQuotationRequest, QuotationStatusResponse};
use crate::models::quotation::{Quotation, QuotationStatus};
use crate::repositories::quotation_repository::QuotationRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct QuotationController {
    repository: QuotationRepository,
}

impl QuotationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: QuotationRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateQuotationRequest) -> Result<Quotation, AppError> {
        let quotation = self
            .repository
            .create(
                request.name.trim(),
                &request.email.trim().to_lowercase(),
                request.phone.trim(),
                request.vehicle_id.trim(),
                request.message.trim(),
            )
            .await?;

        log::info!("📨 Nueva cotización #{} para {}", quotation.id, quotation.vehicle_id);
        Ok(quotation)
    }

    pub async fn list(&self) -> Result<Vec<Quotation>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Quotation, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cotización", id))
    }

    /// Avanza el estado; retroceder es un conflicto
    pub async fn update_status(&self, id: i64, status: &str) -> Result<QuotationStatusResponse, AppError> {
        let next = status
            .parse::<QuotationStatus>()
            .map_err(|msg| validation_error("status", "enum", msg))?;

        let current = self.get_by_id(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "No se puede pasar de '{}' a '{}'",
                current.status, next
            )));
        }

        if current.status != next {
            self.repository.update_status(id, next).await?;
        }

        Ok(QuotationStatusResponse { id, status: next })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Cotización", id));
        }
        Ok(())
    }
}
