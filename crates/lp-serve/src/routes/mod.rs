pub mod error;
pub mod pages;
pub mod progress;

use crate::middleware::correlation::correlation_middleware;
use crate::{AppState, openapi, static_files};
use axum::Router;
use axum::middleware;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(progress::router(state.clone()))
        .merge(openapi::router());

    Router::new()
        .merge(pages::router(state))
        .merge(static_files::router())
        .nest("/api", api)
        .layer(middleware::from_fn(correlation_middleware))
        .layer(TraceLayer::new_for_http())
}
