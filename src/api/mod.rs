use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::proxy::BackendProxy;

pub mod handlers;
pub mod models;

pub fn create_router(proxy: Arc<BackendProxy>) -> Router {
    // CORS configuration: wildcard origin, fixed method allow-list
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        // Proxy routes: each forwards its body verbatim to the backend
        .route(
            "/api/v1/subscriptions",
            post(handlers::subscriptions_handler).options(handlers::preflight_handler),
        )
        .route(
            "/api/v1/process-text",
            post(handlers::process_text_handler).options(handlers::preflight_handler),
        )
        .route(
            "/api/v1/search",
            post(handlers::search_handler).options(handlers::preflight_handler),
        )
        .with_state(proxy)
        .layer(cors)
}
