//! Middleware del sistema
//!
//! Este módulo contiene el middleware de sesión, CORS y rate limiting.

pub mod cors;
pub mod rate_limit;
pub mod session;

pub use cors::*;
pub use rate_limit::*;
pub use session::{ensure_session, session_middleware, Session, SESSION_COOKIE};
