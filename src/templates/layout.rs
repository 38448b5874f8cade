//! Estructura común de las páginas
//!
//! Une encabezado, cuerpo y pie. El cuerpo llega ya formado por `pages`.

use axum::http::StatusCode;

use crate::services::session_guard::GuardState;
use crate::templates::{footer::render_footer, header::render_header};
use crate::utils::sanitize::escape_html;

/// Datos de la request que necesitan las plantillas
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Nombre del script pedido (`index.php`, `contacto.php`, ...)
    pub script: String,
    pub guard: GuardState,
    pub flash: Option<String>,
}

impl PageContext {
    pub fn new(script: impl Into<String>, guard: GuardState) -> Self {
        Self {
            script: script.into(),
            guard,
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: Option<String>) -> Self {
        self.flash = flash;
        self
    }
}

/// Página completa: encabezado + cuerpo + pie
pub fn render_page(ctx: &PageContext, title: &str, body: &str) -> String {
    let mut html = render_header(ctx, title);
    html.push_str(body);
    html.push_str(&render_footer(ctx));
    html
}

/// Página de error autónoma, sin navegación de sesión
pub fn render_error_page(status: StatusCode, title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <base href="/">
    <title>{title} | Monitoreo Energético</title>
    <link rel="stylesheet" href="css/estilos.css">
</head>
<body>
    <main class="error-page">
        <h1>{code} - {title}</h1>
        <p>{message}</p>
        <p><a href="index.php">Volver al inicio</a></p>
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        code = status.as_u16(),
        message = escape_html(message),
    )
}
