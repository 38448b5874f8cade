use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::sanitize::sanitize;

// Formulario de login
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "Ingrese un correo electrónico válido"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Ingrese su contraseña"))]
    pub password: String,
}

impl LoginForm {
    pub fn sanitized(self) -> Self {
        Self {
            email: sanitize(&self.email),
            password: sanitize(&self.password),
        }
    }
}

// Formulario de registro
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres"))]
    pub nombre: String,

    #[serde(default)]
    #[validate(email(message = "Ingrese un correo electrónico válido"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 100, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: String,

    #[serde(default)]
    pub password_confirmacion: String,
}

impl RegisterForm {
    pub fn sanitized(self) -> Self {
        Self {
            nombre: sanitize(&self.nombre),
            email: sanitize(&self.email),
            password: sanitize(&self.password),
            password_confirmacion: sanitize(&self.password_confirmacion),
        }
    }

    /// Validar campos y que la confirmación coincida con la contraseña
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.password != self.password_confirmacion {
            let mut error = ValidationError::new("must_match");
            error.message = Some("Las contraseñas no coinciden".into());
            errors.add("password_confirmacion", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
