//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y la tabla de endpoints que consume el cliente.

pub mod api_config;
pub mod database;
pub mod environment;

pub use api_config::{ApiConfig, Environment, ProductionUrls};
pub use database::DatabaseConfig;
pub use environment::*;
