use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use portal_monitoreo::config::{DatabaseConfig, EnvironmentConfig};
use portal_monitoreo::models::session::{SessionData, SessionId, SessionUser};
use portal_monitoreo::services::{MemorySessionStore, SessionStore};
use portal_monitoreo::{create_router, AppState};

// Base de datos inalcanzable: las páginas que no la usan deben funcionar igual
fn unreachable_database() -> DatabaseConfig {
    DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        user: "portal".to_string(),
        password: "clave".to_string(),
        name: "monitoreo".to_string(),
    }
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        backend_host: Some("10.1.2.3".to_string()),
        rate_limit_requests: 100,
        ..EnvironmentConfig::default()
    }
}

fn create_test_app(config: EnvironmentConfig) -> (Router, MemorySessionStore) {
    let store = MemorySessionStore::default();
    let state = AppState::with_store(config, unreachable_database(), Arc::new(store.clone()));
    (create_router(state), store)
}

async fn logged_in_cookie(store: &MemorySessionStore, id: i64, role: &str, name: &str) -> String {
    let session_id = SessionId::generate();
    let mut data = SessionData::default();
    data.login(SessionUser {
        id,
        role: role.to_string(),
        name: name.to_string(),
    });
    store.save(&session_id, data).await;
    format!("SESION_ID={}", session_id)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::HOST, "localhost:8080");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::HOST, "localhost:8080")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_home_anonymous_navigation() {
    let (app, store) = create_test_app(test_config());
    let response = app.oneshot(get("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Sin datos que guardar no hay cookie ni entrada en el almacén
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(store.len().await, 0);

    let html = body_string(response).await;
    assert!(html.contains(r#"href="contacto.php""#));
    assert!(html.contains(r#"href="login.php""#));
    assert!(html.contains(r#"href="register.php""#));
    assert!(!html.contains("logout.php"));
    assert!(!html.contains("dashboard_"));
    assert!(html.contains("js/chart.min.js"));
    assert!(html.contains("js/inicio.js"));
}

#[tokio::test]
async fn test_contact_page_has_no_home_scripts() {
    let (app, _) = create_test_app(test_config());
    let response = app.oneshot(get("/contacto.php", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<a href="contacto.php" class="active">Contacto</a>"#));
    assert!(html.contains("js/config.js"));
    assert!(!html.contains("js/inicio.js"));
}

#[tokio::test]
async fn test_authenticated_navigation() {
    let (app, store) = create_test_app(test_config());
    let cookie = logged_in_cookie(&store, 7, "admin", "Ana").await;

    let response = app.oneshot(get("/index.php", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let html = body_string(response).await;
    assert!(html.contains(r#"href="dashboard_admin.php""#));
    assert!(html.contains("Hola, Ana (Admin)"));
    assert!(html.contains(r#"href="logout.php""#));
    assert!(!html.contains(r#"href="login.php""#));
    assert!(!html.contains(r#"href="register.php""#));
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let (app, store) = create_test_app(test_config());
    let response = app
        .clone()
        .oneshot(get("/dashboard_admin.php", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login.php");

    // El aviso de login viaja en una sesión nueva
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("SESION_ID="));
    assert_eq!(store.len().await, 1);

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let response = app.oneshot(get("/login.php", Some(&cookie))).await.unwrap();
    assert!(body_string(response).await.contains("Inicie sesión para continuar."));
}

#[tokio::test]
async fn test_cookieless_misses_leave_no_sessions() {
    let (app, store) = create_test_app(test_config());

    for i in 0..20 {
        let response = app
            .clone()
            .oneshot(get(&format!("/x{}.ico", i), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_dashboard_for_own_role() {
    let (app, store) = create_test_app(test_config());
    let cookie = logged_in_cookie(&store, 7, "admin", "Ana").await;

    let response = app
        .clone()
        .oneshot(get("/dashboard_admin.php", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Panel de Admin"));
    assert!(html.contains(r#"<a href="dashboard_admin.php" class="active">Panel</a>"#));

    let response = app
        .oneshot(get("/dashboard_operador.php", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_link_leads_to_missing_page() {
    let (app, store) = create_test_app(test_config());
    let cookie = logged_in_cookie(&store, 3, "auditor", "Eva").await;

    let response = app
        .clone()
        .oneshot(get("/index.php", Some(&cookie)))
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(html.contains(r#"href="dashboard_auditor.php""#));

    let response = app
        .oneshot(get("/dashboard_auditor.php", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let (app, store) = create_test_app(test_config());
    let cookie = logged_in_cookie(&store, 7, "admin", "Ana").await;
    assert_eq!(store.len().await, 1);

    let response = app.oneshot(get("/logout.php", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/index.php");

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_contact_validation_happens_before_database() {
    let (app, _) = create_test_app(test_config());
    let response = app
        .oneshot(post_form(
            "/contacto.php",
            "nombre=%3Cscript%3Ealert(1)%3C%2Fscript%3E&correo=no-es-correo&asunto=&mensaje=corto",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("Ingrese un correo electrónico válido"));
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_login_validation_error() {
    let (app, _) = create_test_app(test_config());
    let response = app
        .oneshot(post_form("/login.php", "email=ana&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("Ingrese su contraseña"));
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let (app, _) = create_test_app(test_config());
    let response = app
        .oneshot(post_form(
            "/register.php",
            "nombre=Ana&email=ana%40energia.gov.co&password=clave-segura&password_confirmacion=otra-clave",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Las contraseñas no coinciden"));
}

#[tokio::test]
async fn test_database_failure_is_recoverable() {
    let (app, _) = create_test_app(test_config());

    let response = app
        .clone()
        .oneshot(post_form(
            "/login.php",
            "email=ana%40energia.gov.co&password=clave-segura",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(response).await;
    assert!(html.contains("No fue posible acceder a la base de datos"));
    assert!(!html.contains("clave"));

    // El servidor sigue atendiendo
    let response = app.oneshot(get("/index.php", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_config_script_development() {
    let (app, _) = create_test_app(test_config());
    let response = app.oneshot(get("/js/config.js", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));
    let script = body_string(response).await;
    assert!(script.contains("\"BASE_URL\": \"http://localhost:8000/api\""));
    assert!(script.contains("\"ENVIRONMENT\": \"development\""));
}

#[tokio::test]
async fn test_config_json_production() {
    let (app, _) = create_test_app(test_config());
    let request = Request::builder()
        .uri("/api/config")
        .header(header::HOST, "portal.energia.gov.co")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["ENVIRONMENT"], "production");
    assert_eq!(body["BASE_URL"], "http://10.1.2.3:8000/api");
    assert_eq!(body["ADMIN_URL"], "http://10.1.2.3:8000/admin");
    assert_eq!(body["TIMEOUT"], 10000);
    assert_eq!(body["ENDPOINTS"]["MEDIDOR_DETALLE"], "/medidores/{id}");
}

#[tokio::test]
async fn test_unknown_pages_are_not_found() {
    let (app, _) = create_test_app(test_config());

    let response = app.clone().oneshot(get("/nada.php", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/carpeta/otra.php", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app(test_config());
    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_form_submissions_are_rate_limited() {
    let config = EnvironmentConfig {
        rate_limit_requests: 2,
        ..test_config()
    };
    let (app, _) = create_test_app(config);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_form("/contacto.php", "nombre="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(post_form("/contacto.php", "nombre="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Las páginas GET no cuentan
    let response = app.oneshot(get("/contacto.php", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_forwarded_for_does_not_reset_rate_limit() {
    let config = EnvironmentConfig {
        rate_limit_requests: 2,
        ..test_config()
    };
    let (app, _) = create_test_app(config);

    let mut statuses = Vec::new();
    for i in 0..3 {
        let mut request = post_form("/contacto.php", "nombre=");
        request.headers_mut().insert(
            "x-forwarded-for",
            format!("203.0.113.{}", i).parse().unwrap(),
        );
        statuses.push(app.clone().oneshot(request).await.unwrap().status());
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::BAD_REQUEST,
            StatusCode::BAD_REQUEST,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );
}
