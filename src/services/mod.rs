//! Servicios del portal
//!
//! Lógica de sesión compartida por las páginas.

pub mod session_guard;
pub mod session_store;

pub use session_store::{MemorySessionStore, SessionStore};
