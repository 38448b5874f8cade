//! Middleware de Rate Limiting
//!
//! Limita los envíos de formularios (login, registro, contacto) por IP con
//! una ventana fija en memoria.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado compartido del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
    trusted_proxies: Arc<Vec<IpAddr>>,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self::with_limits(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        )
        .with_trusted_proxies(config.trusted_proxies.clone())
    }

    pub fn with_limits(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
            trusted_proxies: Arc::new(Vec::new()),
        }
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = Arc::new(proxies);
        self
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), RateLimitError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(RateLimitError::LimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Errores de rate limiting
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded")]
    LimitExceeded,
}

/// IP del cliente. `X-Forwarded-For` sólo cuenta si la conexión llega desde
/// un proxy de confianza; en otro caso manda la dirección del socket.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trusted: &[IpAddr]) -> String {
    let Some(peer_ip) = peer.map(|addr| addr.ip()) else {
        return "desconocido".to_string();
    };

    if !trusted.contains(&peer_ip) {
        return peer_ip.to_string();
    }

    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer_ip.to_string())
}

/// Middleware de rate limiting; sólo cuenta los envíos POST
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() != Method::POST {
        return Ok(next.run(request).await);
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer, &rate_limit_state.trusted_proxies);

    if let Err(RateLimitError::LimitExceeded) = rate_limit_state.check_rate_limit(&ip).await {
        warn!("🚫 Límite de envíos excedido para {} en {}", ip, request.uri().path());
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_per_ip() {
        let state = RateLimitState::with_limits(2, Duration::from_secs(60));
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.1").await.is_err());
        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_expires() {
        let state = RateLimitState::with_limits(1, Duration::from_millis(20));
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.1").await.is_err());
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
    }

    #[test]
    fn test_client_ip() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.1.5:5000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer), &[]), "192.168.1.5");
        assert_eq!(client_ip(&headers, None, &[]), "desconocido");

        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        let proxy = vec![peer.ip()];
        assert_eq!(client_ip(&headers, Some(peer), &proxy), "203.0.113.9");
    }

    #[test]
    fn test_forwarded_for_ignored_from_untrusted_peer() {
        let peer: SocketAddr = "198.51.100.7:4000".parse().unwrap();
        let trusted: Vec<IpAddr> = vec!["10.0.0.1".parse().unwrap()];

        for spoofed in ["1.1.1.1", "2.2.2.2", "3.3.3.3"] {
            let mut headers = HeaderMap::new();
            headers.insert("x-forwarded-for", spoofed.parse().unwrap());
            assert_eq!(client_ip(&headers, Some(peer), &trusted), "198.51.100.7");
        }
    }
}
