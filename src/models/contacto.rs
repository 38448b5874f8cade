//! Modelo de mensaje de contacto
//!
//! Mapea la tabla `contactos`.

use chrono::{DateTime, Utc};

use crate::dto::contacto_dto::ContactForm;

/// Mensaje recibido desde el formulario de contacto
#[derive(Debug, Clone, PartialEq)]
pub struct NuevoContacto {
    pub nombre: String,
    pub correo: String,
    pub asunto: String,
    pub mensaje: String,
    pub creado_en: DateTime<Utc>,
}

impl From<ContactForm> for NuevoContacto {
    fn from(form: ContactForm) -> Self {
        Self {
            nombre: form.nombre,
            correo: form.correo,
            asunto: form.asunto,
            mensaje: form.mensaje,
            creado_en: Utc::now(),
        }
    }
}
