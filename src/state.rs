//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Toda la configuración se construye una vez en
//! el arranque y viaja aquí; nada se lee de globales después.

use std::sync::Arc;

use crate::config::{DatabaseConfig, EnvironmentConfig, ProductionUrls};
use crate::middleware::rate_limit::RateLimitState;
use crate::services::session_store::{MemorySessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub database: DatabaseConfig,
    pub production_urls: ProductionUrls,
    pub sessions: Arc<dyn SessionStore>,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, database: DatabaseConfig) -> Self {
        Self::with_store(config, database, Arc::new(MemorySessionStore::default()))
    }

    pub fn with_store(
        config: EnvironmentConfig,
        database: DatabaseConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let production_urls = ProductionUrls::from_backend_host(config.backend_host.as_deref());
        let rate_limit = RateLimitState::new(&config);

        Self {
            config,
            database,
            production_urls,
            sessions,
            rate_limit,
        }
    }
}
