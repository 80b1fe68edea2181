//! Gateway error type: every failure a route can produce, rendered as JSON.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::status_map::{grpc_code_name, http_status_or};

/// Failure outcome of a route handler.
///
/// Local failures (missing credential, malformed body, bad parameter) are
/// detected before any backend call. [`RestError::Rpc`] carries the backend's
/// [`tonic::Status`]: its code goes through the status table and its message
/// reaches the client unchanged.
///
/// Every variant renders as:
///
/// ```json
/// { "error": "<message>" }
/// ```
///
/// # Examples
///
/// ```
/// use axum::response::IntoResponse;
/// use noted_rest::RestError;
///
/// let response = RestError::from(tonic::Status::failed_precondition("group is full")).into_response();
/// assert_eq!(response.status(), axum::http::StatusCode::FAILED_DEPENDENCY);
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RestError {
    /// The route requires a credential and the `Authorization` header is
    /// absent or empty.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The request body is present but is not valid JSON for the target message.
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A path or query parameter has a value outside its closed set.
    #[error("{message}")]
    InvalidParameter {
        /// Parameter name (e.g., `format`).
        name: &'static str,
        /// Client-facing message.
        message: String,
    },

    /// A path segment could not be decoded (e.g., `%FF`).
    #[error(transparent)]
    Path(#[from] PathRejection),

    /// The inbound body could not be read.
    #[error(transparent)]
    Body(#[from] BytesRejection),

    /// The backend response could not be encoded as JSON.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    /// The backend call failed.
    #[error("{}: {}", grpc_code_name(.0.code()), .0.message())]
    Rpc(tonic::Status),
}

impl RestError {
    /// HTTP status this error is rendered with.
    ///
    /// Backend failures go through the status table with 500 as the fallback
    /// for codes outside it.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidJson(_) | Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::Path(rejection) => rejection.status(),
            Self::Body(rejection) => rejection.status(),
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rpc(status) => {
                http_status_or(status.code() as i32, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Client-facing message placed in the `error` field.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Rpc(status) => status.message().to_owned(),
            Self::Path(rejection) => rejection.body_text(),
            Self::Body(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }

    /// Returns the backend status when this is a backend failure.
    #[must_use]
    pub const fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::Rpc(status) => Some(status),
            _ => None,
        }
    }
}

impl From<tonic::Status> for RestError {
    fn from(status: tonic::Status) -> Self {
        Self::Rpc(status)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message() });
        (self.http_status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_body(err: RestError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let http_status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (http_status, json)
    }

    #[tokio::test]
    async fn unauthenticated_body() {
        let (status, json) = error_body(RestError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json, serde_json::json!({ "error": "unauthenticated" }));
    }

    #[tokio::test]
    async fn rpc_message_passes_through_unchanged() {
        let (status, json) = error_body(tonic::Status::not_found("note not found").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, serde_json::json!({ "error": "note not found" }));
    }

    #[tokio::test]
    async fn rpc_permission_denied_is_unauthorized() {
        let (status, json) = error_body(tonic::Status::permission_denied("not a member").into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "not a member");
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let (status, json) = error_body(RestError::InvalidJson(source)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("invalid json: "), "got: {message}");
    }

    #[tokio::test]
    async fn invalid_parameter_is_bad_request() {
        let err = RestError::InvalidParameter {
            name: "format",
            message: "unknown export format 'xyz'".to_owned(),
        };
        let (status, json) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown export format 'xyz'");
    }

    #[tokio::test]
    async fn empty_rpc_message() {
        let (status, json) = error_body(tonic::Status::internal("").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "");
    }

    #[tokio::test]
    async fn response_content_type_is_json() {
        let response = RestError::Unauthenticated.into_response();
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(
            content_type.contains("application/json"),
            "expected JSON content-type, got: {content_type}",
        );
    }

    #[test]
    fn display_includes_code_name() {
        let err = RestError::from(tonic::Status::unavailable("notes down"));
        assert_eq!(err.to_string(), "UNAVAILABLE: notes down");
    }

    #[test]
    fn status_accessor() {
        let err = RestError::from(tonic::Status::aborted("conflict"));
        assert_eq!(err.status().map(tonic::Status::code), Some(tonic::Code::Aborted));
        assert!(RestError::Unauthenticated.status().is_none());
    }

    /// `RestError` crosses task boundaries inside axum handlers.
    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestError>();
    };
}
