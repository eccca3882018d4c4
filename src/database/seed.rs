//! Datos iniciales
//!
//! Se insertan una sola vez; volver a ejecutar la siembra no duplica filas.

use sqlx::SqlitePool;

use crate::models::location::LocationType;
use crate::models::setting::default_settings;
use crate::models::vehicle::{self, Vehicle};
use crate::repositories::admin_user_repository::AdminUserRepository;
use crate::repositories::location_repository::{LocationFields, LocationRepository};
use crate::repositories::settings_repository::SettingsRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

const DEFAULT_VEHICLES: &[(&str, &str, &str, &str, &str)] = &[
    ("1", "Toyota Corolla", "₺450", "₺5.000", "/img/1.jpg"),
    ("2", "Honda Civic", "₺500", "₺5.500", "/img/2.jpg"),
    ("3", "Ford Focus", "₺480", "₺5.200", "/img/3.jpg"),
    ("4", "Hyundai Elantra", "₺420", "₺4.800", "/img/4.jpg"),
    ("5", "Nissan Altima", "₺520", "₺5.800", "/img/5.jpeg"),
];

const DEFAULT_LOCATIONS: &[(&str, &str, &str, LocationType)] = &[
    ("İstanbul Avrupa", "İstanbul Havalimanı (IST)", "IST", LocationType::Airport),
    ("İstanbul Anadolu", "Sabiha Gökçen İç Hatlar (SAW)", "SAW", LocationType::Airport),
    ("İstanbul Anadolu", "Sabiha Gökçen Dış Hatlar (SAW)", "SAW", LocationType::Airport),
    ("İzmir", "Adnan Menderes H. Dış Hatlar (ADB)", "ADB", LocationType::Airport),
    ("İzmir", "Adnan Menderes H. İç Hatlar (ADB)", "ADB", LocationType::Airport),
    ("Antalya", "Antalya Havalimanı Dış Hatlar (AYT)", "AYT", LocationType::Airport),
    ("Antalya", "Antalya Havalimanı İç Hatlar (AYT)", "AYT", LocationType::Airport),
    ("Ankara", "Esenboğa Havalimanı Dış Hatlar (ESB)", "ESB", LocationType::Airport),
    ("Ankara", "Esenboğa Havalimanı İç Hatlar (ESB)", "ESB", LocationType::Airport),
    ("Kayseri", "Kayseri Havalimanı (ASR)", "ASR", LocationType::Airport),
    ("Adana-Mersin", "Çukurova Havalimanı (COV)", "COV", LocationType::Airport),
    ("Gaziantep", "Gaziantep Havalimanı Dış Hatlar (GZT)", "GZT", LocationType::Airport),
    ("Gaziantep", "Gaziantep Havalimanı İç Hatlar (GZT)", "GZT", LocationType::Airport),
    ("Diyarbakır", "Diyarbakır Havalimanı (DIY)", "DIY", LocationType::Airport),
    ("Diyarbakır", "Diyarbakır Rancar Ofis (DIY)", "DIY", LocationType::Office),
    ("Konya", "Konya Havalimanı Dış Hatlar (KYA)", "KYA", LocationType::Airport),
    ("Konya", "Konya Havalimanı İç Hatlar (KYA)", "KYA", LocationType::Airport),
    ("Trabzon", "Trabzon Havalimanı Dış Hatlar (TZX)", "TZX", LocationType::Airport),
    ("Trabzon", "Trabzon Havalimanı İç Hatlar (TZX)", "TZX", LocationType::Airport),
    ("Samsun", "Samsun Havalimanı (SZF)", "SZF", LocationType::Airport),
    ("Hatay", "Hatay Havalimanı İç Hatlar (HTY)", "HTY", LocationType::Airport),
    ("Hatay", "Hatay Havalimanı Dış Hatlar (HTY)", "HTY", LocationType::Airport),
    ("Hatay", "Hatay Rancar Ofis (HTY)", "HTY", LocationType::Office),
    ("Dalaman", "Dalaman Havalimanı Dış Hatlar (DLM)", "DLM", LocationType::Airport),
    ("Dalaman", "Dalaman Havalimanı İç Hatlar (DLM)", "DLM", LocationType::Airport),
    ("Bodrum", "Bodrum Havalimanı Dış Hatlar (BJV)", "BJV", LocationType::Airport),
    ("Bodrum", "Bodrum Havalimanı İç Hatlar (BJV)", "BJV", LocationType::Airport),
];

/// Resumen de lo insertado en la siembra
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeedReport {
    pub vehicles: usize,
    pub locations: usize,
}

pub async fn seed_defaults(pool: &SqlitePool) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    let settings = SettingsRepository::new(pool.clone());
    for (key, value) in default_settings() {
        settings.insert_if_missing(key, value).await?;
    }

    let vehicles = VehicleRepository::new(pool.clone());
    if vehicles.count().await? == 0 {
        log::info!("🚗 Insertando vehículos por defecto...");
        for (id, model, price, deposit, image) in DEFAULT_VEHICLES {
            vehicles
                .create(&Vehicle {
                    id: id.to_string(),
                    model: model.to_string(),
                    price: price.to_string(),
                    deposit: deposit.to_string(),
                    status: vehicle::DEFAULT_STATUS.to_string(),
                    image: image.to_string(),
                    passengers: vehicle::DEFAULT_PASSENGERS,
                    fuel: vehicle::DEFAULT_FUEL.to_string(),
                    transmission: vehicle::DEFAULT_TRANSMISSION.to_string(),
                    category: vehicle::DEFAULT_CATEGORY.to_string(),
                })
                .await?;
            report.vehicles += 1;
        }
    }

    let locations = LocationRepository::new(pool.clone());
    if locations.count().await? == 0 {
        log::info!("📍 Insertando ubicaciones por defecto...");
        for (region, name, code, location_type) in DEFAULT_LOCATIONS {
            let inserted = locations
                .insert_if_missing(&LocationFields {
                    region: region.to_string(),
                    name: name.to_string(),
                    code: code.to_string(),
                    location_type: *location_type,
                    is_active: true,
                })
                .await?;
            if inserted {
                report.locations += 1;
            }
        }
    }

    if AdminUserRepository::new(pool.clone()).count().await? == 0 {
        log::warn!("⚠️ No hay usuarios administradores");
        log::warn!("📝 Crea el primero con POST /api/auth/setup");
        log::warn!("   Body: {{ \"username\": \"admin\", \"password\": \"...\", \"email\": \"...\" }}");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = DatabaseConnection::in_memory().await.unwrap();

        let first = seed_defaults(db.pool()).await.unwrap();
        assert_eq!(first.vehicles, DEFAULT_VEHICLES.len());
        assert_eq!(first.locations, DEFAULT_LOCATIONS.len());

        let second = seed_defaults(db.pool()).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let settings = SettingsRepository::new(db.pool().clone());
        assert_eq!(settings.get("vatRate").await.unwrap().as_deref(), Some("20"));
        assert_eq!(settings.get("discountRate").await.unwrap().as_deref(), Some("15"));
    }
}
