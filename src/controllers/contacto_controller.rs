use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::DatabaseConnection;
use crate::dto::contacto_dto::ContactForm;
use crate::models::contacto::NuevoContacto;
use crate::repositories::contacto_repository::ContactoRepository;
use crate::utils::errors::AppError;

pub struct ContactoController<'a> {
    database: &'a DatabaseConfig,
}

impl<'a> ContactoController<'a> {
    pub fn new(database: &'a DatabaseConfig) -> Self {
        Self { database }
    }

    /// Guardar un mensaje de contacto ya limpio y validado
    pub async fn submit(&self, form: ContactForm) -> Result<u64, AppError> {
        let contacto = NuevoContacto::from(form);

        let mut db = DatabaseConnection::connect(self.database).await?;
        let result = ContactoRepository::new(&mut db).create(&contacto).await;
        db.close().await;

        let id = result?;
        info!("📨 Mensaje de contacto {} recibido: '{}'", id, contacto.asunto);
        Ok(id)
    }
}
