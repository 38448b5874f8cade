//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del portal
//! y su conversión a páginas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::templates::layout::render_error_page;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error de conexión a la base de datos: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Código HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Connection(_)
            | AppError::Database(_)
            | AppError::Hash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Título y mensaje que se muestran al visitante. Los detalles internos
    /// (driver, hashing) sólo van al log.
    fn public_message(&self) -> (&'static str, String) {
        match self {
            AppError::Connection(_) | AppError::Database(_) => (
                "Servicio no disponible",
                "No fue posible acceder a la base de datos. Intente más tarde.".to_string(),
            ),
            AppError::Validation(_) => (
                "Datos no válidos",
                "Los datos enviados no son válidos.".to_string(),
            ),
            AppError::Unauthorized(msg) => ("No autorizado", msg.clone()),
            AppError::Forbidden(msg) => ("Acceso prohibido", msg.clone()),
            AppError::NotFound(msg) => ("Página no encontrada", msg.clone()),
            AppError::Conflict(msg) => ("Conflicto", msg.clone()),
            AppError::BadRequest(msg) => ("Solicitud incorrecta", msg.clone()),
            AppError::RateLimitExceeded => (
                "Demasiadas solicitudes",
                "Ha realizado demasiadas solicitudes. Intente más tarde.".to_string(),
            ),
            AppError::Hash(_) | AppError::Internal(_) => (
                "Error interno",
                "Ocurrió un error inesperado.".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ {}", self);
        }

        let (title, message) = self.public_message();
        (status, Html(render_error_page(status, title, &message))).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("La página '{}' no existe", resource))
}

/// Convertir una violación de clave única (MySQL 1062) en conflicto. Cualquier
/// otro error sigue siendo de base de datos.
pub fn unique_violation_as_conflict(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("No puede {}: {}", operation, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Connection("refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(not_found_error("x.php").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            forbidden_error("ver el panel", "rol distinto").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::RateLimitExceeded.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[derive(Debug)]
    struct DuplicateEntry;

    impl std::fmt::Display for DuplicateEntry {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Duplicate entry 'ana@energia.gov.co' for key 'email'")
        }
    }

    impl std::error::Error for DuplicateEntry {}

    impl sqlx::error::DatabaseError for DuplicateEntry {
        fn message(&self) -> &str {
            "Duplicate entry 'ana@energia.gov.co' for key 'email'"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err = sqlx::Error::Database(Box::new(DuplicateEntry));
        let mapped = unique_violation_as_conflict(err, "El correo ya está registrado");
        assert_eq!(mapped.status_code(), StatusCode::CONFLICT);
        assert!(mapped.to_string().contains("El correo ya está registrado"));

        let other = unique_violation_as_conflict(sqlx::Error::RowNotFound, "x");
        assert!(matches!(other, AppError::Database(_)));
    }

    #[test]
    fn test_connection_error_keeps_driver_message() {
        let err = AppError::Connection("Access denied for user 'root'".to_string());
        assert!(err.to_string().contains("Access denied for user 'root'"));
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let (_, message) = AppError::Connection("password=secreta".to_string()).public_message();
        assert!(!message.contains("secreta"));
    }

    #[tokio::test]
    async fn test_into_response_renders_html() {
        let response = not_found_error("nada.php").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Página no encontrada"));
        assert!(html.contains("nada.php"));
    }
}
