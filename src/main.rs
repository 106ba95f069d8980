use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_management::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use fleet_management::controllers::diagnostics_controller;
use fleet_management::database::DatabaseConnection;
use fleet_management::routes::create_router;
use fleet_management::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG sobreescribe el filtro por defecto)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    diagnostics_controller::mark_started();

    info!("🚛 Fleet Management API");
    info!("================================================");

    let config = EnvironmentConfig::from_env().context("Configuración de entorno inválida")?;
    let db_config = DatabaseConfig::from_env().context("Configuración de base de datos inválida")?;

    if config.is_production() && config.storage_backend == StorageBackend::Memory {
        warn!("⚠️ Entorno de producción con document store en memoria");
    }

    // Inicializar el document store
    let db_connection = match DatabaseConnection::connect(&db_config, config.storage_backend).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    let addr = config.server_url();
    let app = create_router(AppState::new(db_connection, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Liveness");
    info!("   GET  /api/test-db - Diagnóstico del document store");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos (?status=&search=&page=&limit=)");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles/stats - Contadores por estado y tipo");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Reemplazar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("👤 Conductores:");
    info!("   GET  /api/drivers - Listar conductores (?status=&search=&page=&limit=&view=)");
    info!("   POST /api/drivers - Crear conductor");
    info!("   GET  /api/drivers/:id - Obtener conductor");
    info!("   PUT  /api/drivers/:id - Reemplazar conductor");
    info!("   DELETE /api/drivers/:id - Eliminar conductor");
    info!("🏢 Empresa:");
    info!("   GET  /api/company - Obtener empresa");
    info!("   POST|PUT /api/company - Crear o actualizar empresa");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("No se pudo abrir {}", addr))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
