//! Conexión a MySQL
//!
//! Una conexión por solicitud, abierta con la configuración explícita del
//! portal. Sin pool, sin transacciones y sin reintentos.

use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tracing::{debug, error, warn};

use crate::config::DatabaseConfig;
use crate::utils::errors::{AppError, AppResult};

/// Manejador de una conexión viva a la base de datos
pub struct DatabaseConnection {
    conn: Option<MySqlConnection>,
}

impl DatabaseConnection {
    /// Abrir una conexión. Un fallo se devuelve como `AppError::Connection`
    /// con el mensaje del driver; la capa HTTP decide qué mostrar.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let url = config.url();
        debug!("🔗 Conectando a MySQL: {}", mask_database_url(&url));

        match MySqlConnection::connect(&url).await {
            Ok(conn) => Ok(Self { conn: Some(conn) }),
            Err(e) => {
                error!(
                    "❌ Error conectando a la base de datos {}: {}",
                    mask_database_url(&url),
                    e
                );
                Err(AppError::Connection(e.to_string()))
            }
        }
    }

    /// Manejador sin conexión; `close` sobre él no hace nada
    pub fn closed() -> Self {
        Self { conn: None }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Acceso a la conexión para ejecutar consultas
    pub fn conn(&mut self) -> AppResult<&mut MySqlConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| AppError::Connection("la conexión ya fue cerrada".to_string()))
    }

    /// Liberar la conexión si sigue abierta. Llamarlo de nuevo no hace nada.
    pub async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                warn!("⚠️ Error cerrando la conexión: {}", e);
            } else {
                debug!("🔌 Conexión cerrada");
            }
        }
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }

    let credentials = &url[scheme_end..at_pos];
    let masked = if credentials.contains(':') { "***:***" } else { "***" };
    format!("{}{}@{}", &url[..scheme_end], masked, &url[at_pos + 1..])
}
