//! Middleware de sesión
//!
//! Lee la cookie `SESION_ID`, reanuda o inicia la sesión, la deja en las
//! extensions de la request y la persiste al terminar la respuesta.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::models::session::{SessionData, SessionId, SessionUser};
use crate::services::session_store::SessionStore;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const SESSION_COOKIE: &str = "SESION_ID";

#[derive(Debug)]
struct SessionInner {
    id: SessionId,
    data: SessionData,
    destroyed: bool,
    /// Identificador almacenado antes de `regenerate`, pendiente de borrar
    replaced: Option<SessionId>,
}

/// Sesión de la request en curso
#[derive(Clone, Debug)]
pub struct Session {
    is_new: bool,
    inner: Arc<RwLock<SessionInner>>,
}

/// Estado de la sesión al terminar la request
#[derive(Debug)]
struct SessionOutcome {
    id: SessionId,
    data: SessionData,
    destroyed: bool,
    replaced: Option<SessionId>,
}

impl Session {
    fn new(id: SessionId, data: SessionData, is_new: bool) -> Self {
        Self {
            is_new,
            inner: Arc::new(RwLock::new(SessionInner {
                id,
                data,
                destroyed: false,
                replaced: None,
            })),
        }
    }

    pub async fn id(&self) -> SessionId {
        self.inner.read().await.id.clone()
    }

    /// `true` si la sesión no venía del almacén
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub async fn data(&self) -> SessionData {
        self.inner.read().await.data.clone()
    }

    pub async fn login(&self, user: SessionUser) {
        self.inner.write().await.data.login(user);
    }

    /// Cambiar el identificador conservando los datos. El anterior se borra
    /// del almacén y el navegador recibe la cookie nueva.
    pub async fn regenerate(&self) {
        let mut inner = self.inner.write().await;
        let previous = std::mem::replace(&mut inner.id, SessionId::generate());
        if !self.is_new && inner.replaced.is_none() {
            inner.replaced = Some(previous);
        }
        debug!("🔄 Identificador de sesión regenerado: {}", inner.id);
    }

    pub async fn set_flash(&self, message: impl Into<String>) {
        self.inner.write().await.data.flash = Some(message.into());
    }

    /// Consumir el mensaje flash pendiente
    pub async fn take_flash(&self) -> Option<String> {
        self.inner.write().await.data.flash.take()
    }

    /// Terminar la sesión; al cerrar la respuesta se borra del almacén
    pub async fn destroy(&self) {
        let mut inner = self.inner.write().await;
        inner.data = SessionData::default();
        inner.destroyed = true;
    }

    pub async fn is_destroyed(&self) -> bool {
        self.inner.read().await.destroyed
    }

    async fn outcome(&self) -> SessionOutcome {
        let inner = self.inner.read().await;
        SessionOutcome {
            id: inner.id.clone(),
            data: inner.data.clone(),
            destroyed: inner.destroyed,
            replaced: inner.replaced.clone(),
        }
    }
}

/// Valor de una cookie en los headers de la request
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Asegurar que la request tenga sesión. Si ya se inició en esta request se
/// devuelve la misma, sin reiniciarla ni duplicarla.
pub async fn ensure_session(store: &dyn SessionStore, request: &mut Request) -> Session {
    if let Some(session) = request.extensions().get::<Session>() {
        return session.clone();
    }

    let resumed = match cookie_value(request.headers(), SESSION_COOKIE).and_then(|raw| SessionId::parse(&raw)) {
        Some(id) => store.load(&id).await.map(|data| (id, data)),
        None => None,
    };

    let session = match resumed {
        Some((id, data)) => Session::new(id, data, false),
        None => {
            let id = SessionId::generate();
            debug!("🆕 Nueva sesión iniciada: {}", id);
            Session::new(id, SessionData::default(), true)
        }
    };

    request.extensions_mut().insert(session.clone());
    session
}

fn session_cookie(id: &SessionId, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn expired_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Middleware que inicia/reanuda la sesión y la guarda tras la respuesta.
/// Una sesión nueva sólo se guarda, y sólo recibe cookie, cuando tiene datos.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let store = state.sessions.clone();
    let session = ensure_session(store.as_ref(), &mut request).await;

    let mut response = next.run(request).await;

    let outcome = session.outcome().await;
    if let Some(previous) = &outcome.replaced {
        store.destroy(previous).await;
    }

    let cookie = if outcome.destroyed {
        store.destroy(&outcome.id).await;
        debug!("👋 Sesión destruida: {}", outcome.id);
        Some(expired_cookie())
    } else if session.is_new() && outcome.data.is_empty() {
        None
    } else {
        store.save(&outcome.id, outcome.data).await;
        (session.is_new() || outcome.replaced.is_some())
            .then(|| session_cookie(&outcome.id, state.config.is_production()))
    };

    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => error!("❌ Cookie de sesión inválida: {}", e),
        }
    }

    response
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("sesión no iniciada para esta ruta".to_string()))
    }
}
