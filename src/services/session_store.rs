//! Almacén de sesiones
//!
//! Guarda `SessionData` por identificador. La implementación por defecto vive
//! en memoria; el trait permite enchufar otro almacén sin tocar las páginas.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::session::{SessionData, SessionId};

/// Operaciones de un almacén de sesiones
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &SessionId) -> Option<SessionData>;
    async fn save(&self, id: &SessionId, data: SessionData);
    async fn destroy(&self, id: &SessionId);
}

#[derive(Debug, Clone)]
struct StoredSession {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

/// Almacén en memoria compartido entre solicitudes
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
    max_idle: Duration,
}

impl MemorySessionStore {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
        }
    }

    /// Eliminar sesiones inactivas por más de `max_idle`
    pub async fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| now - stored.last_seen < self.max_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("🧹 {} sesiones expiradas eliminadas", removed);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(2))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> Option<SessionData> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        match sessions.get_mut(id) {
            Some(stored) if now - stored.last_seen < self.max_idle => {
                stored.last_seen = now;
                Some(stored.data.clone())
            }
            Some(_) => {
                sessions.remove(id);
                None
            }
            None => None,
        }
    }

    async fn save(&self, id: &SessionId, data: SessionData) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            id.clone(),
            StoredSession {
                data,
                last_seen: Utc::now(),
            },
        );
    }

    async fn destroy(&self, id: &SessionId) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionUser;

    #[tokio::test]
    async fn test_save_load_destroy() {
        let store = MemorySessionStore::default();
        let id = SessionId::generate();
        assert!(store.load(&id).await.is_none());

        let mut data = SessionData::default();
        data.login(SessionUser {
            id: 1,
            role: "operador".to_string(),
            name: "Luis".to_string(),
        });
        store.save(&id, data.clone()).await;
        assert_eq!(store.load(&id).await, Some(data));

        store.destroy(&id).await;
        assert!(store.load(&id).await.is_none());
        store.destroy(&id).await;
    }

    #[tokio::test]
    async fn test_expired_sessions_are_dropped() {
        let store = MemorySessionStore::new(Duration::zero());
        let id = SessionId::generate();
        store.save(&id, SessionData::default()).await;
        assert!(store.load(&id).await.is_none());

        store.save(&id, SessionData::default()).await;
        assert_eq!(store.cleanup_expired().await, 1);
        assert_eq!(store.len().await, 0);
    }
}
