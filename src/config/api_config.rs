//! Configuración de la API para el cliente
//!
//! Tabla inmutable de endpoints del backend REST, mensajes por código HTTP y
//! mensajes de error que consumen los scripts del navegador. El entorno se
//! elige una sola vez por carga de página a partir del hostname.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Marcador que queda en las URLs de producción cuando no se configura el host
pub const BACKEND_PLACEHOLDER: &str = "[BACKEND_VM_IP]";

/// Tiempo máximo por petición que usan los scripts del cliente
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

const DEV_BASE_URL: &str = "http://localhost:8000/api";
const DEV_ADMIN_URL: &str = "http://localhost:8000/admin";
const BACKEND_PORT: u16 = 8000;

const ENDPOINTS: &[(&str, &str)] = &[
    // Autenticación
    ("LOGIN", "/auth/login"),
    ("LOGOUT", "/auth/logout"),
    ("REGISTER", "/auth/register"),
    ("PERFIL", "/auth/me"),
    // Usuarios
    ("USUARIOS", "/usuarios"),
    ("USUARIO_DETALLE", "/usuarios/{id}"),
    ("USUARIO_ROL", "/usuarios/{id}/rol"),
    // Medidores y lecturas
    ("MEDIDORES", "/medidores"),
    ("MEDIDOR_DETALLE", "/medidores/{id}"),
    ("MEDIDOR_LECTURAS", "/medidores/{id}/lecturas"),
    ("LECTURA_DETALLE", "/lecturas/{id}"),
    // Consumo
    ("CONSUMO_RESUMEN", "/consumo/resumen"),
    ("CONSUMO_REGION", "/consumo/region/{region}"),
    ("CONSUMO_PERIODO", "/consumo/{anio}/{mes}"),
    // Alertas
    ("ALERTAS", "/alertas"),
    ("ALERTA_DETALLE", "/alertas/{id}"),
    ("ALERTA_ATENDER", "/alertas/{id}/atender"),
    // Reportes
    ("REPORTES", "/reportes"),
    ("REPORTE_DESCARGA", "/reportes/{id}/descarga"),
    // Contacto
    ("CONTACTO", "/contacto"),
];

const STATUS_MESSAGES: &[(u16, &str)] = &[
    (200, "Operación exitosa"),
    (201, "Recurso creado correctamente"),
    (204, "Operación completada sin contenido"),
    (400, "Solicitud incorrecta"),
    (401, "No autorizado. Inicie sesión nuevamente"),
    (403, "Acceso prohibido"),
    (404, "Recurso no encontrado"),
    (409, "Conflicto con el estado actual del recurso"),
    (422, "Datos de entrada no válidos"),
    (429, "Demasiadas solicitudes. Intente más tarde"),
    (500, "Error interno del servidor"),
    (502, "Puerta de enlace incorrecta"),
    (503, "Servicio no disponible"),
    (504, "Tiempo de espera agotado en la puerta de enlace"),
];

/// Entorno de ejecución detectado en el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Detectar el entorno a partir del hostname del navegador
pub fn detect_environment(hostname: &str) -> Environment {
    let hostname = hostname.trim().to_ascii_lowercase();
    if hostname == "localhost" || hostname == "127.0.0.1" || hostname.contains("local") {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// Extraer el hostname de un header `Host` (sin puerto ni corchetes IPv6)
pub fn hostname_from_host_header(host: &str) -> &str {
    let host = host.trim();
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.split(':').next().unwrap_or(host)
}

/// Categorías de error que el cliente muestra al usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Timeout,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Network,
        ErrorKind::Server,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Validation,
        ErrorKind::Timeout,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Timeout => "TIMEOUT_ERROR",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Error de conexión. Verifique su conexión a internet.",
            ErrorKind::Server => "Error en el servidor. Intente nuevamente más tarde.",
            ErrorKind::Unauthorized => "Su sesión ha expirado. Inicie sesión nuevamente.",
            ErrorKind::Forbidden => "No tiene permisos para realizar esta acción.",
            ErrorKind::NotFound => "El recurso solicitado no existe.",
            ErrorKind::Validation => "Los datos enviados no son válidos.",
            ErrorKind::Timeout => "La solicitud tardó demasiado. Intente nuevamente.",
        }
    }
}

/// URLs que sustituyen a las de desarrollo en producción
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionUrls {
    pub base_url: String,
    pub admin_url: String,
}

impl ProductionUrls {
    /// Construir las URLs de producción para el host del backend.
    /// Sin host se conserva el marcador literal.
    pub fn from_backend_host(host: Option<&str>) -> Self {
        let host = host.unwrap_or(BACKEND_PLACEHOLDER);
        Self {
            base_url: format!("http://{}:{}/api", host, BACKEND_PORT),
            admin_url: format!("http://{}:{}/admin", host, BACKEND_PORT),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.base_url.contains(BACKEND_PLACEHOLDER)
    }
}

/// Configuración completa que recibe el navegador
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ApiConfig {
    pub environment: Environment,
    pub base_url: String,
    pub admin_url: String,
    pub timeout: u64,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub status_messages: BTreeMap<u16, &'static str>,
    pub error_messages: BTreeMap<&'static str, &'static str>,
}

impl ApiConfig {
    /// Tabla base de desarrollo
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            base_url: DEV_BASE_URL.to_string(),
            admin_url: DEV_ADMIN_URL.to_string(),
            timeout: REQUEST_TIMEOUT_MS,
            endpoints: ENDPOINTS.iter().copied().collect(),
            status_messages: STATUS_MESSAGES.iter().copied().collect(),
            error_messages: ErrorKind::ALL
                .iter()
                .map(|kind| (kind.key(), kind.message()))
                .collect(),
        }
    }

    /// Resolver la ruta de un endpoint sustituyendo los `{marcadores}`.
    /// Los marcadores sin valor se dejan tal cual.
    pub fn endpoint(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let template = self.endpoints.get(name)?;
        let mut path = (*template).to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{}}}", key), &urlencoding::encode(value));
        }
        Some(path)
    }

    /// URL absoluta de un endpoint sobre `base_url`
    pub fn url(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.endpoint(name, params)
            .map(|path| format!("{}{}", self.base_url, path))
    }

    pub fn status_message(&self, code: u16) -> Option<&'static str> {
        self.status_messages.get(&code).copied()
    }

    pub fn error_message(&self, kind: ErrorKind) -> &'static str {
        self.error_messages
            .get(kind.key())
            .copied()
            .unwrap_or_else(|| kind.message())
    }

    /// Script que publica la configuración congelada en `window.API_CONFIG`
    pub fn to_script(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(format!(
            r#"(function () {{
    'use strict';
    var config = {json};
    function buildApiUrl(name, params) {{
        var path = config.ENDPOINTS[name];
        if (path === undefined) {{
            return null;
        }}
        Object.keys(params || {{}}).forEach(function (key) {{
            path = path.split('{{' + key + '}}').join(encodeURIComponent(params[key]));
        }});
        return config.BASE_URL + path;
    }}
    window.API_CONFIG = Object.freeze(config);
    window.buildApiUrl = buildApiUrl;
}})();
"#,
            json = json
        ))
    }
}

/// Elegir la configuración para el entorno dado: la tabla base de desarrollo,
/// con `BASE_URL` y `ADMIN_URL` reemplazadas en producción.
pub fn get_config(environment: Environment, production: &ProductionUrls) -> ApiConfig {
    let mut config = ApiConfig::development();
    if environment == Environment::Production {
        config.environment = Environment::Production;
        config.base_url = production.base_url.clone();
        config.admin_url = production.admin_url.clone();
    }
    config
}
