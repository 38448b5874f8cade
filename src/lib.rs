//! Portal institucional del Centro Nacional de Monitoreo Energético
//!
//! Páginas con sesión (inicio, contacto, ingreso, registro y paneles por rol),
//! conexión a MySQL por solicitud y la configuración de endpoints que consumen
//! los scripts del navegador.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod templates;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
