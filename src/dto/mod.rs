//! Formularios recibidos por las páginas

pub mod auth_dto;
pub mod contacto_dto;
