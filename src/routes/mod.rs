//! Rutas del portal

pub mod assets;
pub mod pages;

use axum::{http::Uri, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Crear el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::create_pages_router(&state))
        .merge(assets::create_assets_router(&state))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn fallback(uri: Uri) -> AppError {
    not_found_error(uri.path().trim_start_matches('/'))
}
