//! Modelo de sesión
//!
//! Estado del visitante entre solicitudes, con campos tipados en lugar de
//! claves de texto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Usuario autenticado guardado en la sesión
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub role: String,
    pub name: String,
}

/// Datos de una sesión
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub authenticated_user: Option<SessionUser>,
    /// Mensaje que se muestra una sola vez en la siguiente página
    pub flash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            authenticated_user: None,
            flash: None,
            created_at: Utc::now(),
        }
    }
}

impl SessionData {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated_user.is_some()
    }

    /// Sin usuario ni mensaje pendiente: no hace falta guardarla
    pub fn is_empty(&self) -> bool {
        self.authenticated_user.is_none() && self.flash.is_none()
    }

    pub fn login(&mut self, user: SessionUser) {
        self.authenticated_user = Some(user);
    }
}

/// Identificador de sesión que viaja en la cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Aceptar sólo identificadores con el formato que genera el portal
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::try_parse(raw.trim()).ok().map(|id| Self(id.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
