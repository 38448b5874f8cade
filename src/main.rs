use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use portal_monitoreo::config::{DatabaseConfig, EnvironmentConfig};
use portal_monitoreo::database::connection::mask_database_url;
use portal_monitoreo::services::MemorySessionStore;
use portal_monitoreo::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("⚡ Centro Nacional de Monitoreo Energético - Portal institucional");
    info!("================================================================");

    let config = EnvironmentConfig::from_env();
    let database = DatabaseConfig::from_env();
    info!("🔧 Entorno: {}", config.environment);
    info!("🗄️ Base de datos: {}", mask_database_url(&database.url()));

    let sessions = MemorySessionStore::default();
    let app_state = AppState::with_store(config.clone(), database, Arc::new(sessions.clone()));

    if app_state.production_urls.is_placeholder() {
        warn!("⚠️ BACKEND_HOST no configurado: las URLs de producción conservan [BACKEND_VM_IP]");
    }

    // Limpieza periódica de sesiones inactivas
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            sessions.cleanup_expired().await;
        }
    });

    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Páginas disponibles:");
    info!("   GET       /index.php - Inicio");
    info!("   GET/POST  /contacto.php - Formulario de contacto");
    info!("   GET/POST  /login.php - Iniciar sesión");
    info!("   GET/POST  /register.php - Registro");
    info!("   GET       /logout.php - Cerrar sesión");
    info!("   GET       /dashboard_{{rol}}.php - Panel por rol");
    info!("🧩 Cliente:");
    info!("   GET  /js/config.js - Configuración de la API");
    info!("   GET  /api/config - Configuración de la API (JSON)");
    info!("   GET  /health - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
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
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
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
