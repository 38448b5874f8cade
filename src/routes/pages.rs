//! Páginas del sitio
//!
//! Cada página se direcciona por nombre de script (`index.php`,
//! `contacto.php`, ...). Los paneles `dashboard_{rol}.php` se resuelven en la
//! ruta comodín.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use validator::Validate;

use crate::controllers::auth_controller::AuthController;
use crate::controllers::contacto_controller::ContactoController;
use crate::dto::auth_dto::{LoginForm, RegisterForm};
use crate::dto::contacto_dto::ContactForm;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::middleware::session::{session_middleware, Session};
use crate::services::session_guard::{
    capitalize, dashboard_script, is_known_role, GuardState, CONTACT_SCRIPT, HOME_SCRIPT, LOGIN_SCRIPT,
    LOGOUT_SCRIPT, REGISTER_SCRIPT,
};
use crate::state::AppState;
use crate::templates::pages::{contact_body, dashboard_body, home_body, login_body, register_body};
use crate::templates::{render_page, PageContext};
use crate::utils::errors::{forbidden_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{error_messages, single_message};

pub const CONTACT_THANKS: &str = "Gracias por escribirnos. Responderemos a la brevedad.";
pub const REGISTER_DONE: &str = "Cuenta creada. Ya puede iniciar sesión.";
pub const LOGIN_REQUIRED: &str = "Inicie sesión para continuar.";

/// Crear el router de páginas, con sesión y límite de envíos
pub fn create_pages_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/index.php", get(home_page))
        .route("/contacto.php", get(contact_page).post(submit_contact))
        .route("/login.php", get(login_page).post(submit_login))
        .route("/register.php", get(register_page).post(submit_register))
        .route("/logout.php", get(logout))
        .route("/:script", get(script_page))
        .layer(from_fn_with_state(state.rate_limit.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(state.clone(), session_middleware))
}

fn location(script: &str) -> String {
    format!("/{}", script)
}

async fn page_context(session: &Session, script: &str) -> PageContext {
    let guard = GuardState::from_session(&session.data().await);
    let flash = session.take_flash().await;
    PageContext::new(script, guard).with_flash(flash)
}

fn html_page(status: StatusCode, ctx: &PageContext, title: &str, body: &str) -> Response {
    (status, Html(render_page(ctx, title, body))).into_response()
}

async fn home_page(session: Session) -> Response {
    let ctx = page_context(&session, HOME_SCRIPT).await;
    html_page(StatusCode::OK, &ctx, "Inicio", &home_body())
}

async fn contact_page(session: Session) -> Response {
    let ctx = page_context(&session, CONTACT_SCRIPT).await;
    html_page(
        StatusCode::OK,
        &ctx,
        "Contacto",
        &contact_body(&ContactForm::default(), &[]),
    )
}

async fn submit_contact(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    let form = form.sanitized();

    if let Err(errors) = form.validate() {
        let ctx = page_context(&session, CONTACT_SCRIPT).await;
        let body = contact_body(&form, &error_messages(&errors));
        return Ok(html_page(StatusCode::BAD_REQUEST, &ctx, "Contacto", &body));
    }

    ContactoController::new(&state.database).submit(form).await?;
    session.set_flash(CONTACT_THANKS).await;
    Ok(Redirect::to(&location(CONTACT_SCRIPT)).into_response())
}

async fn login_page(session: Session) -> Response {
    if let Some(role) = authenticated_role(&session).await {
        return Redirect::to(&location(&dashboard_script(&role))).into_response();
    }
    let ctx = page_context(&session, LOGIN_SCRIPT).await;
    html_page(StatusCode::OK, &ctx, "Iniciar sesión", &login_body("", &[]))
}

async fn submit_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let form = form.sanitized();

    if let Err(errors) = form.validate() {
        let ctx = page_context(&session, LOGIN_SCRIPT).await;
        let body = login_body(&form.email, &error_messages(&errors));
        return Ok(html_page(StatusCode::BAD_REQUEST, &ctx, "Iniciar sesión", &body));
    }

    match AuthController::new(&state.database).login(&form).await {
        Ok(user) => {
            let target = location(&dashboard_script(&user.role));
            session.regenerate().await;
            session.login(user).await;
            Ok(Redirect::to(&target).into_response())
        }
        Err(AppError::Unauthorized(message)) => {
            let ctx = page_context(&session, LOGIN_SCRIPT).await;
            let body = login_body(&form.email, &single_message(&message));
            Ok(html_page(StatusCode::UNAUTHORIZED, &ctx, "Iniciar sesión", &body))
        }
        Err(e) => Err(e),
    }
}

async fn register_page(session: Session) -> Response {
    if let Some(role) = authenticated_role(&session).await {
        return Redirect::to(&location(&dashboard_script(&role))).into_response();
    }
    let ctx = page_context(&session, REGISTER_SCRIPT).await;
    html_page(
        StatusCode::OK,
        &ctx,
        "Registro",
        &register_body(&RegisterForm::default(), &[]),
    )
}

async fn submit_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let form = form.sanitized();

    if let Err(errors) = form.validate_all() {
        let ctx = page_context(&session, REGISTER_SCRIPT).await;
        let body = register_body(&form, &error_messages(&errors));
        return Ok(html_page(StatusCode::BAD_REQUEST, &ctx, "Registro", &body));
    }

    match AuthController::new(&state.database).register(&form).await {
        Ok(_) => {
            session.set_flash(REGISTER_DONE).await;
            Ok(Redirect::to(&location(LOGIN_SCRIPT)).into_response())
        }
        Err(AppError::Conflict(message)) => {
            let ctx = page_context(&session, REGISTER_SCRIPT).await;
            let body = register_body(&form, &single_message(&message));
            Ok(html_page(StatusCode::CONFLICT, &ctx, "Registro", &body))
        }
        Err(e) => Err(e),
    }
}

async fn logout(session: Session) -> Redirect {
    session.destroy().await;
    Redirect::to(&location(HOME_SCRIPT))
}

/// Paneles por rol; cualquier otro script es 404
async fn script_page(Path(script): Path<String>, session: Session) -> AppResult<Response> {
    let role = script
        .strip_prefix("dashboard_")
        .and_then(|rest| rest.strip_suffix(".php"))
        .ok_or_else(|| not_found_error(&script))?;

    let data = session.data().await;
    let Some(user) = data.authenticated_user.as_ref() else {
        session.set_flash(LOGIN_REQUIRED).await;
        return Ok(Redirect::to(&location(LOGIN_SCRIPT)).into_response());
    };

    if !is_known_role(role) {
        return Err(not_found_error(&script));
    }
    if user.role != role {
        return Err(forbidden_error("ver este panel", "corresponde a otro rol"));
    }

    let ctx = page_context(&session, &script).await;
    let title = format!("Panel de {}", capitalize(role));
    Ok(html_page(
        StatusCode::OK,
        &ctx,
        &title,
        &dashboard_body(&user.role, &user.name),
    ))
}

async fn authenticated_role(session: &Session) -> Option<String> {
    session
        .data()
        .await
        .authenticated_user
        .map(|user| user.role)
}
