use crate::database::DatabaseConnection;
use crate::models::usuario::{NuevoUsuario, Usuario, EMAIL_TAKEN};
use crate::utils::errors::{unique_violation_as_conflict, AppError};

pub struct UsuarioRepository<'a> {
    db: &'a mut DatabaseConnection,
}

impl<'a> UsuarioRepository<'a> {
    pub fn new(db: &'a mut DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&mut self, email: &str) -> Result<Option<Usuario>, AppError> {
        let result = sqlx::query_as::<_, Usuario>(
            "SELECT id, nombre, email, password_hash, rol FROM usuarios WHERE email = ? LIMIT 1",
        )
        .bind(email)
        .fetch_optional(self.db.conn()?)
        .await?;

        Ok(result)
    }

    pub async fn email_exists(&mut self, email: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE email = ?")
            .bind(email)
            .fetch_one(self.db.conn()?)
            .await?;

        Ok(count > 0)
    }

    /// Insertar un usuario y devolver su id. Un correo repetido que se cuele
    /// entre la verificación y el INSERT llega como `AppError::Conflict`.
    pub async fn create(&mut self, usuario: &NuevoUsuario) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, email, password_hash, rol)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&usuario.nombre)
        .bind(&usuario.email)
        .bind(&usuario.password_hash)
        .bind(&usuario.rol)
        .execute(self.db.conn()?)
        .await
        .map_err(|e| unique_violation_as_conflict(e, EMAIL_TAKEN))?;

        Ok(result.last_insert_id() as i64)
    }
}
