//! Geolocalización de visitantes por IP
//!
//! La implementación HTTP consulta ip-api.com. Cualquier fallo degrada a
//! país `Unknown` y ciudad `-`; nunca se propaga al cliente.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const UNKNOWN_CITY: &str = "-";
pub const LOCALHOST: &str = "Localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub country: String,
    pub city: String,
}

impl GeoLocation {
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN_COUNTRY.to_string(),
            city: UNKNOWN_CITY.to_string(),
        }
    }

    pub fn localhost() -> Self {
        Self {
            country: LOCALHOST.to_string(),
            city: LOCALHOST.to_string(),
        }
    }
}

/// Resolución de IP a ubicación; nunca falla
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, ip: &str) -> GeoLocation;
}

/// IPs locales que no se consultan fuera
pub fn is_local_ip(ip: &str) -> bool {
    if ip.eq_ignore_ascii_case("localhost") {
        return true;
    }
    ip.parse::<IpAddr>().map(|addr| addr.is_loopback()).unwrap_or(false)
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    country: Option<String>,
    city: Option<String>,
}

/// Cliente de ip-api.com
pub struct IpApiGeoLocator {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiGeoLocator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("No se pudo crear el cliente HTTP: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, AppError> {
        Self::new(
            config.geolocation_url.clone(),
            Duration::from_secs(config.geolocation_timeout_secs),
        )
    }

    async fn fetch(&self, ip: IpAddr) -> Result<GeoLocation, AppError> {
        let url = format!("{}/{}", self.base_url, ip);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", "status,country,city")])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error consultando ip-api: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "ip-api respondió {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de ip-api inválida: {}", e)))?;

        if body.status != "success" {
            return Ok(GeoLocation::unknown());
        }

        Ok(GeoLocation {
            country: body.country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            city: body.city.unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        })
    }
}

#[async_trait]
impl GeoLocator for IpApiGeoLocator {
    async fn locate(&self, ip: &str) -> GeoLocation {
        if is_local_ip(ip) {
            return GeoLocation::localhost();
        }

        // Solo direcciones válidas llegan a la URL
        let addr = match ip.trim().parse::<IpAddr>() {
            Ok(addr) => addr,
            Err(_) => {
                log::debug!("🌍 IP no válida, sin consulta: {:?}", ip);
                return GeoLocation::unknown();
            }
        };

        match self.fetch(addr).await {
            Ok(location) => {
                log::debug!("🌍 {} -> {} / {}", ip, location.country, location.city);
                location
            }
            Err(e) => {
                log::warn!("⚠️ Geolocalización fallida para {}: {}", ip, e);
                GeoLocation::unknown()
            }
        }
    }
}
