//! Utilidades de validación
//!
//! Convierte los errores de `validator` en mensajes que los formularios
//! muestran al visitante.

use validator::{ValidationErrors, ValidationErrorsKind};

/// Mensajes de error de un formulario, ordenados por campo
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    let mut messages = Vec::new();
    for (field, kind) in fields {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("El campo '{}' no es válido", field));
                messages.push(message);
            }
        }
    }
    messages
}

/// Mensaje genérico para errores sin campo asociado
pub fn single_message(message: &str) -> Vec<String> {
    vec![message.to_string()]
}
