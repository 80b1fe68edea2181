//! # noted-gateway
//!
//! RESTful JSON HTTP front door for the noted gRPC backends.
//!
//! Each REST operation authenticates the caller, turns the request into a
//! protobuf message, makes one typed unary call (two for creating a note
//! inside a group) and renders the reply as JSON, or as a file for exports.
//! Backend failures come back as `{"error": "..."}` with an HTTP status
//! taken from a fixed gRPC code table.
//!
//! ```ignore
//! let config = Cli::parse().resolve()?;
//! let gateway = Gateway::new(backends::connect(&config)?, config.rpc_timeout());
//! axum::serve(listener, noted_gateway::router(gateway)).await?;
//! ```

#![forbid(unsafe_code)]

pub mod backends;
pub mod config;
pub mod dispatch;
mod gateway;
pub mod logging;
mod middleware;
mod routes;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};

pub use gateway::{Backends, Gateway};

/// The complete HTTP application: every route, the JSON fallbacks, CORS and
/// the access log.
#[must_use]
pub fn router(gateway: Gateway) -> Router {
    routes::router()
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(axum::middleware::from_fn(middleware::access_log))
        .with_state(gateway)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "endpoint does not exist" })),
    )
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "method not allowed" })),
    )
}
