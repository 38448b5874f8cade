//! Plantillas HTML del portal
//!
//! Generación directa con `format!`: encabezado y pie compartidos, y un cuerpo
//! por página.

pub mod footer;
pub mod header;
pub mod layout;
pub mod pages;

pub use layout::{render_error_page, render_page, PageContext};
