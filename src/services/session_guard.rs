//! Guardia de sesión
//!
//! Decide, sólo leyendo la sesión, si la página se dibuja para un visitante
//! anónimo o autenticado, y qué enlaces de navegación corresponden.

use crate::models::session::SessionData;

/// Roles que tienen un panel propio
pub const KNOWN_ROLES: &[&str] = &["admin", "operador", "usuario"];

pub const HOME_SCRIPT: &str = "index.php";
pub const CONTACT_SCRIPT: &str = "contacto.php";
pub const LOGIN_SCRIPT: &str = "login.php";
pub const REGISTER_SCRIPT: &str = "register.php";
pub const LOGOUT_SCRIPT: &str = "logout.php";

/// Estado de autenticación visto por las plantillas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Anonymous,
    Authenticated { role: String, name: String },
}

impl GuardState {
    pub fn from_session(data: &SessionData) -> Self {
        match &data.authenticated_user {
            Some(user) => GuardState::Authenticated {
                role: user.role.clone(),
                name: user.name.clone(),
            },
            None => GuardState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, GuardState::Authenticated { .. })
    }

    pub fn role(&self) -> Option<&str> {
        match self {
            GuardState::Authenticated { role, .. } => Some(role),
            GuardState::Anonymous => None,
        }
    }
}

/// Enlace de la barra de navegación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub script: String,
}

impl NavLink {
    fn new(label: &'static str, script: impl Into<String>) -> Self {
        Self {
            label,
            script: script.into(),
        }
    }

    pub fn is_active(&self, current_script: &str) -> bool {
        self.script == current_script
    }
}

/// Ruta del panel para un rol. No se valida contra `KNOWN_ROLES`.
pub fn dashboard_route(role: &str) -> String {
    format!("dashboard_{}", role)
}

pub fn dashboard_script(role: &str) -> String {
    format!("{}.php", dashboard_route(role))
}

/// Enlaces de navegación para el estado dado
pub fn nav_links(state: &GuardState) -> Vec<NavLink> {
    match state {
        GuardState::Anonymous => vec![
            NavLink::new("Contacto", CONTACT_SCRIPT),
            NavLink::new("Iniciar sesión", LOGIN_SCRIPT),
            NavLink::new("Registrarse", REGISTER_SCRIPT),
        ],
        GuardState::Authenticated { role, .. } => vec![
            NavLink::new("Panel", dashboard_script(role)),
            NavLink::new("Contacto", CONTACT_SCRIPT),
            NavLink::new("Cerrar sesión", LOGOUT_SCRIPT),
        ],
    }
}

/// Saludo para el usuario autenticado
pub fn greeting(state: &GuardState) -> Option<String> {
    match state {
        GuardState::Authenticated { role, name } => {
            Some(format!("Hola, {} ({})", name, capitalize(role)))
        }
        GuardState::Anonymous => None,
    }
}

/// Primera letra en mayúscula, el resto sin cambios
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_known_role(role: &str) -> bool {
    KNOWN_ROLES.contains(&role)
}
