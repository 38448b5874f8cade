use serde::Deserialize;
use validator::Validate;

use crate::utils::sanitize::sanitize;

// Formulario de contacto
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub nombre: String,

    #[serde(default)]
    #[validate(email(message = "Ingrese un correo electrónico válido"))]
    pub correo: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 150, message = "El asunto debe tener entre 3 y 150 caracteres"))]
    pub asunto: String,

    #[serde(default)]
    #[validate(length(min = 10, max = 2000, message = "El mensaje debe tener entre 10 y 2000 caracteres"))]
    pub mensaje: String,
}

impl ContactForm {
    pub fn sanitized(self) -> Self {
        Self {
            nombre: sanitize(&self.nombre),
            correo: sanitize(&self.correo),
            asunto: sanitize(&self.asunto),
            mensaje: sanitize(&self.mensaje),
        }
    }
}
