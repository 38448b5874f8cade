//! Limpieza de entradas del usuario
//!
//! `sanitize` recorta espacios, deshace el escapado con barras invertidas y
//! codifica los caracteres especiales de HTML, en ese orden. Es codificación
//! de salida: las consultas SQL siempre usan parámetros enlazados.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Referencia de entidad ya formada: `&amp;`, `&#039;`, `&#x27;`
    static ref ENTITY: Regex =
        Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap();
}

/// Caracteres que `trim` elimina en los extremos
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Limpiar una cadena proveniente del usuario.
///
/// Nunca falla y `sanitize(&sanitize(s)) == sanitize(s)`: las entidades ya
/// codificadas no se vuelven a codificar y las barras invertidas que
/// sobreviven se emiten como `&#92;`.
pub fn sanitize(input: &str) -> String {
    let unescaped = strip_slashes(input.trim_matches(TRIM_CHARS));
    // `\ ` o `\0` pueden dejar espacios o NUL en los extremos
    encode_html(unescaped.trim_matches(TRIM_CHARS), false)
}

/// Codificar texto para insertarlo en HTML (sin recortar ni deshacer escapes)
pub fn escape_html(input: &str) -> String {
    encode_html(input, true)
}

/// Deshacer el escapado con barras invertidas: `\x` -> `x`, `\\` -> `\`,
/// `\0` -> NUL. Una barra final sin pareja se descarta.
pub fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some(next) => out.push(next),
            None => {}
        }
    }

    out
}

fn encode_html(input: &str, double_encode: bool) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);

    for (idx, c) in input.char_indices() {
        match c {
            '&' if !double_encode && ENTITY.is_match(&input[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '\\' if !double_encode => out.push_str("&#92;"),
            _ => out.push(c),
        }
    }

    out
}
