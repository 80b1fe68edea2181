//! Request middleware applied to every route and to the fallbacks.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Allow any origin, method and header. Preflight requests are answered here
/// and never reach a route.
pub(crate) async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    let any = HeaderValue::from_static("*");
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, any);
    response
}

/// One event per request, levelled by response class.
pub(crate) async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let endpoint = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let code = response.status().as_u16();
    let duration = started.elapsed();
    if response.status().is_server_error() {
        tracing::error!(code, %method, %endpoint, ?duration, "failed http request");
    } else if response.status().is_client_error() {
        tracing::warn!(code, %method, %endpoint, ?duration, "invalid http request");
    } else {
        tracing::info!(code, %method, %endpoint, ?duration, "http request");
    }
    response
}
