//! Cuerpos de cada página
//!
//! Los valores de formulario que se vuelven a mostrar ya pasaron por
//! `sanitize`, así que se insertan tal cual.

use crate::dto::auth_dto::RegisterForm;
use crate::dto::contacto_dto::ContactForm;
use crate::services::session_guard::capitalize;
use crate::utils::sanitize::escape_html;

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("            <li>{}</li>\n", escape_html(e)))
        .collect();
    format!(
        "        <div class=\"alerta alerta-error\">\n        <ul>\n{}        </ul>\n        </div>\n",
        items
    )
}

pub fn home_body() -> String {
    r#"        <section class="hero">
            <h1>Energía confiable para todos los colombianos</h1>
            <p>Vigilamos en tiempo real la generación, transmisión y consumo de energía eléctrica
            en el territorio nacional para garantizar un servicio continuo y de calidad.</p>
        </section>
        <section class="indicadores">
            <h2>Indicadores del sistema</h2>
            <canvas id="grafica-consumo" aria-label="Consumo nacional de las últimas 24 horas"></canvas>
            <ul id="resumen-consumo"></ul>
        </section>
        <section class="servicios">
            <h2>¿Qué hacemos?</h2>
            <article>
                <h3>Monitoreo de medidores</h3>
                <p>Recolectamos las lecturas de los medidores inteligentes instalados en las regiones.</p>
            </article>
            <article>
                <h3>Alertas tempranas</h3>
                <p>Detectamos variaciones de tensión y cortes para activar la respuesta de los operadores.</p>
            </article>
            <article>
                <h3>Reportes públicos</h3>
                <p>Publicamos informes periódicos de consumo por región y periodo.</p>
            </article>
        </section>
"#
    .to_string()
}

pub fn contact_body(form: &ContactForm, errors: &[String]) -> String {
    format!(
        r#"        <section class="formulario">
            <h1>Contáctenos</h1>
            <p>Envíenos sus peticiones, quejas, reclamos o sugerencias.</p>
{errors}            <form method="post" action="contacto.php">
                <label for="nombre">Nombre completo</label>
                <input type="text" id="nombre" name="nombre" value="{nombre}" required>
                <label for="correo">Correo electrónico</label>
                <input type="email" id="correo" name="correo" value="{correo}" required>
                <label for="asunto">Asunto</label>
                <input type="text" id="asunto" name="asunto" value="{asunto}" required>
                <label for="mensaje">Mensaje</label>
                <textarea id="mensaje" name="mensaje" rows="6" required>{mensaje}</textarea>
                <button type="submit">Enviar</button>
            </form>
        </section>
"#,
        errors = error_list(errors),
        nombre = form.nombre,
        correo = form.correo,
        asunto = form.asunto,
        mensaje = form.mensaje,
    )
}

pub fn login_body(email: &str, errors: &[String]) -> String {
    format!(
        r#"        <section class="formulario">
            <h1>Iniciar sesión</h1>
{errors}            <form method="post" action="login.php">
                <label for="email">Correo electrónico</label>
                <input type="email" id="email" name="email" value="{email}" required>
                <label for="password">Contraseña</label>
                <input type="password" id="password" name="password" required>
                <button type="submit">Ingresar</button>
            </form>
            <p>¿No tiene cuenta? <a href="register.php">Regístrese</a></p>
        </section>
"#,
        errors = error_list(errors),
        email = email,
    )
}

pub fn register_body(form: &RegisterForm, errors: &[String]) -> String {
    format!(
        r#"        <section class="formulario">
            <h1>Crear cuenta</h1>
{errors}            <form method="post" action="register.php">
                <label for="nombre">Nombre completo</label>
                <input type="text" id="nombre" name="nombre" value="{nombre}" required>
                <label for="email">Correo electrónico</label>
                <input type="email" id="email" name="email" value="{email}" required>
                <label for="password">Contraseña</label>
                <input type="password" id="password" name="password" minlength="8" required>
                <label for="password_confirmacion">Confirmar contraseña</label>
                <input type="password" id="password_confirmacion" name="password_confirmacion" minlength="8" required>
                <button type="submit">Registrarse</button>
            </form>
            <p>¿Ya tiene cuenta? <a href="login.php">Inicie sesión</a></p>
        </section>
"#,
        errors = error_list(errors),
        nombre = form.nombre,
        email = form.email,
    )
}

/// Secciones del panel según el rol
fn dashboard_sections(role: &str) -> &'static str {
    match role {
        "admin" => {
            r#"            <section id="gestion-usuarios"><h2>Gestión de usuarios</h2><table id="tabla-usuarios"></table></section>
            <section id="alertas-sistema"><h2>Alertas del sistema</h2><ul id="lista-alertas"></ul></section>
            <section id="reportes"><h2>Reportes</h2><ul id="lista-reportes"></ul></section>
"#
        }
        "operador" => {
            r#"            <section id="medidores"><h2>Medidores asignados</h2><table id="tabla-medidores"></table></section>
            <section id="alertas-pendientes"><h2>Alertas por atender</h2><ul id="lista-alertas"></ul></section>
"#
        }
        _ => {
            r#"            <section id="mi-consumo"><h2>Mi consumo</h2><canvas id="grafica-consumo"></canvas></section>
            <section id="mis-reportes"><h2>Mis reportes</h2><ul id="lista-reportes"></ul></section>
"#
        }
    }
}

pub fn dashboard_body(role: &str, name: &str) -> String {
    format!(
        r#"        <section class="panel" data-rol="{role}">
            <h1>Panel de {role_label}</h1>
            <p>Bienvenido(a), {name}.</p>
{sections}        </section>
"#,
        role = escape_html(role),
        role_label = escape_html(&capitalize(role)),
        name = escape_html(name),
        sections = dashboard_sections(role),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_body_shows_errors_and_values() {
        let form = ContactForm {
            nombre: "Ana &amp; Luis".to_string(),
            ..Default::default()
        };
        let html = contact_body(&form, &["Ingrese un correo electrónico válido".to_string()]);
        assert!(html.contains("value=\"Ana &amp; Luis\""));
        assert!(html.contains("<li>Ingrese un correo electrónico válido</li>"));
    }

    #[test]
    fn test_login_body_without_errors() {
        let html = login_body("", &[]);
        assert!(!html.contains("alerta-error"));
        assert!(html.contains("action=\"login.php\""));
    }

    #[test]
    fn test_dashboard_sections_per_role() {
        assert!(dashboard_body("admin", "Ana").contains("gestion-usuarios"));
        assert!(dashboard_body("operador", "Luis").contains("tabla-medidores"));
        let html = dashboard_body("usuario", "Eva");
        assert!(html.contains("mi-consumo"));
        assert!(html.contains("Panel de Usuario"));
    }
}
