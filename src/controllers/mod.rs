pub mod auth_controller;
pub mod contacto_controller;
