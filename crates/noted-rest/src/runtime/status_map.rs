//! gRPC → HTTP status code taxonomy.

use axum::http::StatusCode;
use tonic::Code;

/// The gateway's status taxonomy: `(gRPC code, canonical name, HTTP status)`.
///
/// Row `i` describes the gRPC code whose numeric value is `i`, so lookups are a
/// bounds-checked index. This is the gateway's own table, not the canonical
/// gRPC mapping: `PERMISSION_DENIED` is 401, `FAILED_PRECONDITION` is 424,
/// `OUT_OF_RANGE` is 416, and `CANCELLED` is 500.
pub static STATUS_TABLE: [(Code, &str, StatusCode); 17] = [
    (Code::Ok, "OK", StatusCode::OK),
    (Code::Cancelled, "CANCELLED", StatusCode::INTERNAL_SERVER_ERROR),
    (Code::Unknown, "UNKNOWN", StatusCode::INTERNAL_SERVER_ERROR),
    (Code::InvalidArgument, "INVALID_ARGUMENT", StatusCode::BAD_REQUEST),
    (Code::DeadlineExceeded, "DEADLINE_EXCEEDED", StatusCode::REQUEST_TIMEOUT),
    (Code::NotFound, "NOT_FOUND", StatusCode::NOT_FOUND),
    (Code::AlreadyExists, "ALREADY_EXISTS", StatusCode::CONFLICT),
    (Code::PermissionDenied, "PERMISSION_DENIED", StatusCode::UNAUTHORIZED),
    (Code::ResourceExhausted, "RESOURCE_EXHAUSTED", StatusCode::SERVICE_UNAVAILABLE),
    (Code::FailedPrecondition, "FAILED_PRECONDITION", StatusCode::FAILED_DEPENDENCY),
    (Code::Aborted, "ABORTED", StatusCode::SERVICE_UNAVAILABLE),
    (Code::OutOfRange, "OUT_OF_RANGE", StatusCode::RANGE_NOT_SATISFIABLE),
    (Code::Unimplemented, "UNIMPLEMENTED", StatusCode::NOT_IMPLEMENTED),
    (Code::Internal, "INTERNAL", StatusCode::INTERNAL_SERVER_ERROR),
    (Code::Unavailable, "UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE),
    (Code::DataLoss, "DATA_LOSS", StatusCode::INTERNAL_SERVER_ERROR),
    (Code::Unauthenticated, "UNAUTHENTICATED", StatusCode::UNAUTHORIZED),
];

fn row(raw_code: i32) -> Option<&'static (Code, &'static str, StatusCode)> {
    usize::try_from(raw_code)
        .ok()
        .and_then(|index| STATUS_TABLE.get(index))
}

/// Map a raw gRPC status code to an HTTP status, or `fallback` when the code
/// is outside the taxonomy.
///
/// Handlers pass their own default as `fallback` (500 for a failed backend
/// call), so an unclassifiable outcome never gets a guessed status.
///
/// # Examples
///
/// ```
/// use axum::http::StatusCode;
/// use noted_rest::http_status_or;
///
/// assert_eq!(http_status_or(5, StatusCode::INTERNAL_SERVER_ERROR), StatusCode::NOT_FOUND);
/// assert_eq!(http_status_or(99, StatusCode::BAD_GATEWAY), StatusCode::BAD_GATEWAY);
/// ```
#[must_use]
pub fn http_status_or(raw_code: i32, fallback: StatusCode) -> StatusCode {
    row(raw_code).map_or(fallback, |&(_, _, http)| http)
}

/// Map a gRPC status code to the gateway's HTTP status.
///
/// # Examples
///
/// ```
/// use noted_rest::grpc_to_http_status;
///
/// assert_eq!(grpc_to_http_status(tonic::Code::NotFound), axum::http::StatusCode::NOT_FOUND);
/// assert_eq!(grpc_to_http_status(tonic::Code::PermissionDenied), axum::http::StatusCode::UNAUTHORIZED);
/// ```
#[must_use]
pub fn grpc_to_http_status(code: Code) -> StatusCode {
    http_status_or(code as i32, StatusCode::INTERNAL_SERVER_ERROR)
}

/// Return the canonical `SCREAMING_SNAKE_CASE` name for a gRPC status code.
///
/// ```
/// use noted_rest::grpc_code_name;
///
/// assert_eq!(grpc_code_name(tonic::Code::FailedPrecondition), "FAILED_PRECONDITION");
/// ```
#[must_use]
pub fn grpc_code_name(code: Code) -> &'static str {
    row(code as i32).map_or("UNKNOWN", |&(_, name, _)| name)
}
