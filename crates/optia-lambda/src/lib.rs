//! optia-lambda
//!
//! HTTP front end of the OPT-IA chat relay, run on AWS Lambda.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::middleware as axum_mw;
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router.
///
/// The chat endpoint is mounted at `/api/chat` and at `/`. Every response,
/// errors and preflights included, carries permissive CORS headers.
pub fn router(state: AppState) -> Router {
    let chat = get(routes::chat::chat)
        .post(routes::chat::chat)
        .options(routes::chat::preflight);

    Router::new()
        .route("/", chat.clone())
        .route("/api/chat", chat)
        .layer(axum_mw::from_fn(middleware::access_log::access_log))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, x-user-id"),
        ))
        .with_state(state)
}
