//! Modelo de Usuario
//!
//! Mapea la tabla `usuarios` (id BIGINT, nombre, email, password_hash, rol).

use sqlx::FromRow;

use crate::models::session::SessionUser;

/// Rol asignado a las cuentas creadas desde el formulario de registro
pub const DEFAULT_ROLE: &str = "usuario";

pub const EMAIL_TAKEN: &str = "El correo ya está registrado";

/// Usuario registrado en el portal
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub rol: String,
}

/// Datos para insertar un usuario nuevo
#[derive(Debug, Clone)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
    pub rol: String,
}

impl From<&Usuario> for SessionUser {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id,
            role: usuario.rol.clone(),
            name: usuario.nombre.clone(),
        }
    }
}
