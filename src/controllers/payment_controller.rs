use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::payment_dto::{MockIntentRequest, MockIntentResponse};
use crate::models::payment::{NewPayment, Payment, PaymentStatus};
use crate::models::quick_reservation::PLACEHOLDER_LOCATION;
use crate::models::reservation::{NewReservation, ReservationStatus};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::services::auth_service::normalize_email;
use crate::services::pricing;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::{parse_date_time, DEFAULT_HANDOVER_TIME};

pub struct PaymentController {
    pool: SqlitePool,
    repository: PaymentRepository,
}

impl PaymentController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: PaymentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Registra un pago simulado. Solo se guardan marca, últimos 4 dígitos,
    /// titular y caducidad de la tarjeta.
    pub async fn mock_intent(&self, request: MockIntentRequest) -> Result<MockIntentResponse, AppError> {
        let amount = request
            .amount
            .ok_or_else(|| validation_error("amount", "required", "El importe es requerido"))?;
        let new_reservation = match request.reservation_id {
            Some(_) => None,
            None => Some(Self::reservation_from_request(&request, amount)?),
        };

        let intent_id = format!("mock_{}", Uuid::new_v4().simple());
        let mut tx = self.pool.begin().await?;

        let (reservation_id, customer_id) = match (request.reservation_id, new_reservation) {
            (Some(id), _) => {
                let status = ReservationRepository::find_status(&mut *tx, id)
                    .await?
                    .ok_or_else(|| not_found_error("Reserva", id))?;
                if !status.can_transition_to(ReservationStatus::PendingPayment) {
                    return Err(AppError::Conflict(format!(
                        "La reserva #{} está en estado '{}' y no admite pagos",
                        id, status
                    )));
                }
                (id, None)
            }
            (None, Some(mut reservation)) => {
                let customer_id = CustomerRepository::find_or_create(
                    &mut *tx,
                    &reservation.email,
                    Some(reservation.full_name.as_str()),
                    Some(reservation.phone.as_str()),
                )
                .await?;
                reservation.customer_id = Some(customer_id);
                let reservation_id = ReservationRepository::insert(&mut *tx, &reservation).await?;
                (reservation_id, Some(customer_id))
            }
            (None, None) => return Err(AppError::Internal("Reserva de pago no preparada".to_string())),
        };

        let payment = NewPayment {
            reservation_id,
            customer_id,
            intent_id: intent_id.clone(),
            amount,
            currency: request.currency(),
            card: request.card_summary(),
        };
        let payment_id = PaymentRepository::insert(&mut *tx, &payment).await?;
        ReservationRepository::set_status(&mut *tx, reservation_id, ReservationStatus::PendingPayment).await?;
        tx.commit().await?;

        log::info!(
            "💳 Pago simulado #{} para reserva #{}: {} {} ({} ****{})",
            payment_id,
            reservation_id,
            amount,
            payment.currency,
            payment.card.brand,
            payment.card.last4
        );

        Ok(MockIntentResponse {
            success: true,
            reservation_id,
            payment_id,
            intent_id,
            status: PaymentStatus::PendingManual,
            message: "Pago recibido".to_string(),
        })
    }

    fn reservation_from_request(request: &MockIntentRequest, amount: f64) -> Result<NewReservation, AppError> {
        request.require_reservation_fields()?;
        let field = MockIntentRequest::clean_field;

        let pickup_date = field(&request.pickup_date).unwrap_or_default();
        let dropoff_date = field(&request.dropoff_date).unwrap_or_default();
        let pickup_time = field(&request.pickup_time).unwrap_or_else(|| DEFAULT_HANDOVER_TIME.to_string());
        let dropoff_time = field(&request.dropoff_time).unwrap_or_else(|| DEFAULT_HANDOVER_TIME.to_string());

        let pickup = parse_date_time(&pickup_date, Some(&pickup_time))
            .ok_or_else(|| validation_error("pickupDate", "iso_date", "Fecha de recogida no válida"))?;
        let dropoff = parse_date_time(&dropoff_date, Some(&dropoff_time))
            .ok_or_else(|| validation_error("dropoffDate", "iso_date", "Fecha de devolución no válida"))?;
        pricing::rental_days(pickup, dropoff)?;

        let pickup_location = field(&request.pickup_location).unwrap_or_else(|| PLACEHOLDER_LOCATION.to_string());
        let dropoff_location = field(&request.dropoff_location).unwrap_or_else(|| pickup_location.clone());

        Ok(NewReservation {
            full_name: field(&request.full_name).unwrap_or_default(),
            email: normalize_email(&field(&request.email).unwrap_or_default()),
            phone: field(&request.phone).unwrap_or_default(),
            pickup_location,
            dropoff_location,
            pickup_date,
            pickup_time,
            dropoff_date,
            dropoff_time,
            vehicle_id: field(&request.vehicle_id),
            customer_id: None,
            special_requests: None,
            status: ReservationStatus::PendingPayment,
            total_price: Some(pricing::round_money(amount)),
        })
    }

    pub async fn list(&self) -> Result<Vec<Payment>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Payment, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Pago", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Pago", id));
        }
        Ok(())
    }
}
