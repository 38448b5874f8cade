//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y limpieza de entradas.

pub mod errors;
pub mod sanitize;
pub mod validation;
