//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del servidor. Todo se lee
//! una sola vez en el arranque; después viaja dentro de `AppState`.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::warn;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    /// Proxies cuyo `X-Forwarded-For` se acepta para identificar al cliente
    pub trusted_proxies: Vec<IpAddr>,
    /// Host del backend REST en producción. Si falta, la tabla de endpoints
    /// de producción conserva el marcador `[BACKEND_VM_IP]`.
    pub backend_host: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            rate_limit_requests: 10,
            rate_limit_window: 60,
            trusted_proxies: Vec::new(),
            backend_host: None,
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración desde variables de entorno
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests),
            rate_limit_window: parse_or("RATE_LIMIT_WINDOW", defaults.rate_limit_window),
            trusted_proxies: env::var("TRUSTED_PROXIES")
                .map(|raw| parse_ip_list(&raw))
                .unwrap_or(defaults.trusted_proxies),
            backend_host: env::var("BACKEND_HOST")
                .ok()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("⚠️ {} inválido '{}', usando {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_ip_list(raw: &str) -> Vec<IpAddr> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(ip) => Some(ip),
            Err(_) => {
                warn!("⚠️ TRUSTED_PROXIES: '{}' no es una IP, se ignora", s);
                None
            }
        })
        .collect()
}
