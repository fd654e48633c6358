pub mod appresult;
pub mod config;
pub mod db;
pub mod gate;
pub mod index;
pub mod logging;
pub mod thoughts;

use axum::{extract::FromRef, middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use thoughts::Thoughts;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub thoughts: Thoughts,
}

impl AppState {
    pub fn new(thoughts: Thoughts) -> Self {
        Self { thoughts }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .merge(thoughts::router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)

        .layer(middleware::from_fn_with_state(app_state.clone(), gate::require_store))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(app_state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
