//! Servidor HTTP del sitio de alquiler de coches

use std::net::SocketAddr;

use anyhow::Context;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::signal;

use rentcar_api::config::EnvironmentConfig;
use rentcar_api::create_app;
use rentcar_api::database::DatabaseConnection;
use rentcar_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_target(false)
        .init();

    info!("🚗 Rentcar API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let db = DatabaseConnection::new(&config).await?;
    db.seed().await?;

    let addr = config.server_url();
    let state = AppState::new(db.pool().clone(), config)?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("No se pudo escuchar en {}", addr))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔐 Auth:");
    info!("   POST /api/auth/setup - Crear el primer administrador");
    info!("   POST /api/auth/login - Login de administrador");
    info!("   POST /api/auth/verify - Verificar token");
    info!("👤 Clientes:");
    info!("   POST /api/customers/register - Registro");
    info!("   POST /api/customers/login - Login");
    info!("   GET  /api/customers/me - Perfil y reservas");
    info!("🚙 Vehículos:");
    info!("   GET  /api/vehicles - Catálogo");
    info!("   POST /api/vehicles - Alta (admin)");
    info!("📅 Reservas:");
    info!("   POST /api/reservations - Reserva completa");
    info!("   POST /api/quick-reservations - Reserva rápida");
    info!("   POST /api/quotations - Solicitud de cotización");
    info!("   POST /api/pricing/quote - Cálculo de precio");
    info!("   POST /api/payments/mock-intent - Pago simulado");
    info!("📍 Ubicaciones y ajustes:");
    info!("   GET  /api/locations/grouped - Ubicaciones por región");
    info!("   GET  /api/settings - Ajustes públicos");
    info!("🛠️ Administración:");
    info!("   GET  /api/admin/stats/visitors - Estadísticas de visitas");
    info!("   GET  /api/backups - Copias de seguridad");
    info!("   GET  /api/db/tables - Consola de base de datos (root)");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
