//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del portal: la sesión tipada y
//! las filas de MySQL que usan las páginas.

pub mod contacto;
pub mod session;
pub mod usuario;

pub use session::{SessionData, SessionId, SessionUser};
