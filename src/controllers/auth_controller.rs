use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::DatabaseConnection;
use crate::dto::auth_dto::{LoginForm, RegisterForm};
use crate::models::session::SessionUser;
use crate::models::usuario::{NuevoUsuario, DEFAULT_ROLE, EMAIL_TAKEN};
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::AppError;

pub const INVALID_CREDENTIALS: &str = "Correo o contraseña incorrectos";

pub struct AuthController<'a> {
    database: &'a DatabaseConfig,
}

impl<'a> AuthController<'a> {
    pub fn new(database: &'a DatabaseConfig) -> Self {
        Self { database }
    }

    /// Verificar credenciales y devolver el usuario que se guarda en sesión.
    /// El formulario ya viene limpio y validado.
    pub async fn login(&self, form: &LoginForm) -> Result<SessionUser, AppError> {
        let mut db = DatabaseConnection::connect(self.database).await?;
        let found = UsuarioRepository::new(&mut db).find_by_email(&form.email).await;
        db.close().await;

        let usuario = found?.ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let valid = verify(&form.password, &usuario.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!("🔐 Inicio de sesión de usuario {} con rol '{}'", usuario.id, usuario.rol);
        Ok(SessionUser::from(&usuario))
    }

    /// Registrar una cuenta con el rol por defecto
    pub async fn register(&self, form: &RegisterForm) -> Result<i64, AppError> {
        let password_hash = hash(&form.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;

        let mut db = DatabaseConnection::connect(self.database).await?;
        let result = Self::insert_unique(&mut db, form, password_hash).await;
        db.close().await;

        let id = result?;
        info!("👤 Usuario registrado: {}", id);
        Ok(id)
    }

    async fn insert_unique(
        db: &mut DatabaseConnection,
        form: &RegisterForm,
        password_hash: String,
    ) -> Result<i64, AppError> {
        let mut repository = UsuarioRepository::new(db);

        if repository.email_exists(&form.email).await? {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        repository
            .create(&NuevoUsuario {
                nombre: form.nombre.clone(),
                email: form.email.clone(),
                password_hash,
                rol: DEFAULT_ROLE.to_string(),
            })
            .await
    }
}
