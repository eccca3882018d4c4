use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;

use crate::dto::visitor_dto::{TrackVisitRequest, VisitorStats};
use crate::models::visitor::{NewVisit, Visitor};
use crate::repositories::visitor_repository::{VisitorDimension, VisitorRepository};
use crate::services::geolocation_service::GeoLocator;
use crate::services::user_agent::parse_user_agent;
use crate::utils::errors::AppError;

pub const VISITOR_LOG_LIMIT: i64 = 100;

pub struct VisitorController {
    repository: VisitorRepository,
    geolocator: Arc<dyn GeoLocator>,
}

impl VisitorController {
    pub fn new(pool: SqlitePool, geolocator: Arc<dyn GeoLocator>) -> Self {
        Self {
            repository: VisitorRepository::new(pool),
            geolocator,
        }
    }

    /// Clasifica, geolocaliza y guarda una visita
    pub async fn record(
        &self,
        ip: String,
        user_agent: Option<String>,
        request: TrackVisitRequest,
    ) -> Result<i64, AppError> {
        let client = parse_user_agent(user_agent.as_deref());
        let location = self.geolocator.locate(&ip).await;

        let visit = NewVisit {
            ip,
            user_agent,
            referrer: request.referrer.filter(|r| !r.trim().is_empty()),
            page_url: request.page_url.filter(|p| !p.trim().is_empty()),
            device: client.device.to_string(),
            browser: client.browser.to_string(),
            os: client.os.to_string(),
            country: location.country,
            city: location.city,
        };

        self.repository.insert(&visit).await
    }

    pub async fn stats(&self) -> Result<VisitorStats, AppError> {
        let today = Utc::now().date_naive();
        let start_of_day = Utc.from_utc_datetime(&today.and_hms_opt(0, 0, 0).unwrap_or_default());

        Ok(VisitorStats {
            total_visits: self.repository.count_total().await?,
            unique_visitors: self.repository.count_unique_ips().await?,
            today_visits: self.repository.count_since(start_of_day).await?,
            devices: self.repository.grouped(VisitorDimension::Device).await?,
            browsers: self.repository.grouped(VisitorDimension::Browser).await?,
            countries: self.repository.grouped(VisitorDimension::Country).await?,
        })
    }

    pub async fn logs(&self) -> Result<Vec<Visitor>, AppError> {
        self.repository.latest(VISITOR_LOG_LIMIT).await
    }

    pub async fn reset(&self) -> Result<u64, AppError> {
        let deleted = self.repository.delete_all().await?;
        log::warn!("⚠️ Registro de visitas borrado ({} filas)", deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;
    use crate::services::geolocation_service::GeoLocation;
    use async_trait::async_trait;

    struct FixedLocator;

    #[async_trait]
    impl GeoLocator for FixedLocator {
        async fn locate(&self, _ip: &str) -> GeoLocation {
            GeoLocation {
                country: "Turkey".to_string(),
                city: "Istanbul".to_string(),
            }
        }
    }

    #[tokio::test]
    async fn test_record_and_stats() {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let controller = VisitorController::new(db.pool().clone(), Arc::new(FixedLocator));

        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Version/17.0 Mobile/15E148 Safari/604.1";
        controller
            .record("85.100.1.1".into(), Some(iphone.into()), TrackVisitRequest::default())
            .await
            .unwrap();
        controller
            .record("85.100.1.1".into(), None, TrackVisitRequest::default())
            .await
            .unwrap();

        let stats = controller.stats().await.unwrap();
        assert_eq!(stats.total_visits, 2);
        assert_eq!(stats.unique_visitors, 1);
        assert_eq!(stats.today_visits, 2);
        assert_eq!(stats.countries[0].name, "Turkey");
        assert!(stats.devices.iter().any(|d| d.name == "Mobile"));

        let logs = controller.logs().await.unwrap();
        assert_eq!(logs[0].city, "Istanbul");

        assert_eq!(controller.reset().await.unwrap(), 2);
        assert_eq!(controller.stats().await.unwrap().total_visits, 0);
    }
}
