//! HTTP route handlers.
//!
//! Two routes: the `/ping` liveness probe and the `/predict` upload endpoint.
//! Neither response may be cached, and every request is wrapped by the request
//! ID middleware so its logs can be correlated.

pub mod ping;
pub mod predict;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{AppConfig, CACHE_CONTROL_NO_STORE};
use crate::middleware::request_id_layer;

/// Creates the Axum router with all routes and headers.
pub fn create_router(config: &AppConfig) -> Router {
    // Liveness probe - always fresh
    let ping_routes = Router::new().route("/ping", get(ping::ping));

    // Uploads - body size bounded by config
    let predict_routes = Router::new()
        .route("/predict", post(predict::predict))
        .layer(DefaultBodyLimit::max(config.upload.max_body_bytes));

    Router::new()
        .merge(ping_routes)
        .merge(predict_routes)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
