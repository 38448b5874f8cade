//! Encabezado de las páginas: doctype, metadatos y navegación según la sesión

use crate::services::session_guard::{greeting, nav_links, HOME_SCRIPT};
use crate::templates::layout::PageContext;
use crate::utils::sanitize::escape_html;

pub const SITE_NAME: &str = "Centro Nacional de Monitoreo Energético";

pub fn render_header(ctx: &PageContext, title: &str) -> String {
    let mut nav = String::new();
    for link in nav_links(&ctx.guard) {
        let class = if link.is_active(&ctx.script) {
            r#" class="active""#
        } else {
            ""
        };
        nav.push_str(&format!(
            "                <li><a href=\"{href}\"{class}>{label}</a></li>\n",
            href = escape_html(&link.script),
            class = class,
            label = link.label,
        ));
    }

    let greeting = greeting(&ctx.guard)
        .map(|text| format!("        <p class=\"saludo\">{}</p>\n", escape_html(&text)))
        .unwrap_or_default();

    let flash = ctx
        .flash
        .as_deref()
        .map(|text| format!("    <div class=\"alerta alerta-info\">{}</div>\n", escape_html(text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="Portal institucional del {site}: seguimiento del consumo y la calidad del servicio de energía en Colombia.">
    <base href="/">
    <title>{title} | Monitoreo Energético</title>
    <link rel="stylesheet" href="css/estilos.css">
</head>
<body>
    <header class="site-header">
        <a class="marca" href="{home}">{site}</a>
        <nav>
            <ul>
{nav}            </ul>
        </nav>
{greeting}    </header>
{flash}    <main>
"#,
        site = SITE_NAME,
        title = escape_html(title),
        home = HOME_SCRIPT,
        nav = nav,
        greeting = greeting,
        flash = flash,
    )
}
