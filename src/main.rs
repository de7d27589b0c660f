use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_routes::config::{EnvironmentConfig, StorageBackend};
use fleet_routes::create_app;
use fleet_routes::database::{create_pool, run_migrations};
use fleet_routes::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🚚 {} v{}", config.app_name, config.app_version);
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() && !config.allows_any_origin() {
        warn!("⚠️ CORS restringido en desarrollo: {:?}", config.cors_origins);
    }

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                e
            })?;
            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }
            AppState::with_postgres(pool, config.clone())
        }
        StorageBackend::Memory => {
            warn!("⚠️ Usando almacenamiento en memoria, los datos no persisten");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_app(state);

    let addr = config.server_url();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   PATCH /api/vehicles/:id/activate - Activar vehículo");
    info!("   PATCH /api/vehicles/:id/deactivate - Desactivar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("🛣️ Rutas:");
    info!("   GET  /api/routes - Listar rutas");
    info!("   POST /api/routes - Crear ruta");
    info!("   GET  /api/routes/:id - Obtener ruta");
    info!("   PUT  /api/routes/:id - Actualizar estado");
    info!("   PATCH /api/routes/:id/complete - Completar ruta");
    info!("   DELETE /api/routes/:id - Eliminar ruta");
    info!("📊 Performance:");
    info!("   GET  /api/performances - Listar performances");
    info!("   GET  /api/performances/:route_id - Performance de una ruta");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
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
