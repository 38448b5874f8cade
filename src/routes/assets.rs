//! Configuración del cliente y health check
//!
//! `/js/config.js` publica la tabla de endpoints elegida para el hostname de
//! la request; `/api/config` devuelve lo mismo en JSON.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::debug;

use crate::config::api_config::{detect_environment, get_config, hostname_from_host_header, ApiConfig};
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_assets_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/js/config.js", get(config_script))
        .route("/api/config", get(config_json).layer(cors_middleware(&state.config)))
        .route("/health", get(health))
}

/// Configuración para el hostname con que el navegador pidió la página
pub fn config_for_request(state: &AppState, headers: &HeaderMap) -> ApiConfig {
    let hostname = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(hostname_from_host_header)
        .unwrap_or_default();

    let environment = detect_environment(hostname);
    debug!("🌐 Configuración de API para '{}': {}", hostname, environment);
    get_config(environment, &state.production_urls)
}

async fn config_script(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let script = config_for_request(&state, &headers)
        .to_script()
        .map_err(|e| AppError::Internal(format!("Error serializando configuración: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        script,
    )
        .into_response())
}

async fn config_json(State(state): State<AppState>, headers: HeaderMap) -> Json<ApiConfig> {
    Json(config_for_request(&state, &headers))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "portal_monitoreo",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
