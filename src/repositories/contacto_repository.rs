use crate::database::DatabaseConnection;
use crate::models::contacto::NuevoContacto;
use crate::utils::errors::AppError;

pub struct ContactoRepository<'a> {
    db: &'a mut DatabaseConnection,
}

impl<'a> ContactoRepository<'a> {
    pub fn new(db: &'a mut DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&mut self, contacto: &NuevoContacto) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO contactos (nombre, correo, asunto, mensaje, creado_en)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&contacto.nombre)
        .bind(&contacto.correo)
        .bind(&contacto.asunto)
        .bind(&contacto.mensaje)
        .bind(contacto.creado_en)
        .execute(self.db.conn()?)
        .await?;

        Ok(result.last_insert_id())
    }
}
