//! Pie de página y scripts del cliente

use chrono::{Datelike, Utc};

use crate::services::session_guard::HOME_SCRIPT;
use crate::templates::header::SITE_NAME;
use crate::templates::layout::PageContext;

/// Scripts que cargan todas las páginas
pub const COMMON_SCRIPTS: [&str; 2] = ["js/config.js", "js/main.js"];

/// Scripts extra de la página de inicio (gráficas de consumo)
pub const HOME_SCRIPTS: [&str; 2] = ["js/chart.min.js", "js/inicio.js"];

pub fn render_footer(ctx: &PageContext) -> String {
    let mut scripts = String::new();
    let extra: &[&str] = if ctx.script == HOME_SCRIPT {
        &HOME_SCRIPTS
    } else {
        &[]
    };
    for src in COMMON_SCRIPTS.iter().chain(extra.iter()) {
        scripts.push_str(&format!("    <script src=\"{}\"></script>\n", src));
    }

    format!(
        r#"    </main>
    <footer class="site-footer">
        <p>&copy; {year} {site}. República de Colombia.</p>
        <p>Línea de atención: 01 8000 123 456 · <a href="contacto.php">Escríbanos</a></p>
    </footer>
{scripts}</body>
</html>
"#,
        year = Utc::now().year(),
        site = SITE_NAME,
        scripts = scripts,
    )
}
