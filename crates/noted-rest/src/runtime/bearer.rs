//! Bearer propagation: bridges the HTTP `Authorization` header to gRPC metadata.

use std::time::Duration;

use axum::http::{header, HeaderMap};
use tonic::metadata::{Ascii, MetadataValue};
use tonic::Request;

use super::error::RestError;

/// gRPC metadata key the credential is forwarded under.
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// Opaque credential taken verbatim from the `Authorization` header.
///
/// The gateway never inspects it; backends validate it. Holding the parsed
/// metadata value means forwarding can't fail once a `Bearer` exists.
#[derive(Clone)]
pub struct Bearer(MetadataValue<Ascii>);

impl Bearer {
    /// The credential as sent by the client.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

impl std::fmt::Debug for Bearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bearer(<redacted>)")
    }
}

/// Read the credential from the `Authorization` header.
///
/// # Errors
///
/// Returns [`RestError::Unauthenticated`] when the header is absent, empty,
/// or not representable as ASCII gRPC metadata.
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use noted_rest::authenticate;
///
/// let mut headers = HeaderMap::new();
/// assert!(authenticate(&headers).is_err());
///
/// headers.insert("authorization", "Bearer abc".parse().unwrap());
/// assert_eq!(authenticate(&headers).unwrap().as_str(), "Bearer abc");
/// ```
pub fn authenticate(headers: &HeaderMap) -> Result<Bearer, RestError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(RestError::Unauthenticated)?;

    raw.parse::<MetadataValue<Ascii>>()
        .map(Bearer)
        .map_err(|_| RestError::Unauthenticated)
}

/// Outgoing call context: a deadline plus zero-or-one credential.
///
/// One context belongs to one logical operation. Each [`RpcContext::request`]
/// builds a fresh [`tonic::Request`], so an operation made of several backend
/// calls reuses the same credential without sharing request state.
#[derive(Clone, Debug)]
pub struct RpcContext {
    timeout: Duration,
    bearer: Option<Bearer>,
}

impl RpcContext {
    /// Context for an unauthenticated call.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            bearer: None,
        }
    }

    /// Attach the caller's credential.
    #[must_use]
    pub fn with_bearer(mut self, bearer: Bearer) -> Self {
        self.bearer = Some(bearer);
        self
    }

    /// Deadline applied to every request built from this context.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Credential forwarded by this context, if any.
    #[must_use]
    pub const fn bearer(&self) -> Option<&Bearer> {
        self.bearer.as_ref()
    }

    /// Wrap `message` in a [`tonic::Request`] carrying the deadline and, when
    /// present, the credential as `authorization` metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use axum::http::HeaderMap;
    /// use noted_rest::{authenticate, RpcContext};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("authorization", "tok".parse().unwrap());
    ///
    /// let ctx = RpcContext::new(Duration::from_secs(5)).with_bearer(authenticate(&headers).unwrap());
    /// let req = ctx.request("body");
    /// assert_eq!(req.metadata().get("authorization").unwrap(), "tok");
    /// ```
    pub fn request<T>(&self, message: T) -> Request<T> {
        let mut req = Request::new(message);
        req.set_timeout(self.timeout);
        if let Some(Bearer(value)) = &self.bearer {
            req.metadata_mut()
                .insert(AUTHORIZATION_METADATA_KEY, value.clone());
        }
        req
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", auth.parse().unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let err = authenticate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, RestError::Unauthenticated));
    }

    #[test]
    fn empty_header_is_unauthenticated() {
        let err = authenticate(&headers_with("")).unwrap_err();
        assert!(matches!(err, RestError::Unauthenticated));
    }

    #[test]
    fn non_ascii_header_is_unauthenticated() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            axum::http::HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );
        assert!(authenticate(&headers).is_err());
    }

    #[test]
    fn credential_is_opaque() {
        let bearer = authenticate(&headers_with("Bearer eyJhbGciOi.x.y")).unwrap();
        assert_eq!(bearer.as_str(), "Bearer eyJhbGciOi.x.y");
    }

    #[test]
    fn debug_redacts_credential() {
        let bearer = authenticate(&headers_with("secret")).unwrap();
        let debug = format!("{bearer:?}");
        assert!(!debug.contains("secret"), "leaked: {debug}");
    }

    #[test]
    fn request_carries_authorization_metadata() {
        let bearer = authenticate(&headers_with("tok-1")).unwrap();
        let ctx = RpcContext::new(Duration::from_secs(3)).with_bearer(bearer);
        let req = ctx.request(());
        assert_eq!(req.metadata().get("authorization").unwrap(), "tok-1");
        assert_eq!(req.metadata().len(), 2, "authorization + grpc-timeout");
    }

    #[test]
    fn public_request_has_no_authorization() {
        let ctx = RpcContext::new(Duration::from_secs(3));
        let req = ctx.request(());
        assert!(req.metadata().get("authorization").is_none());
        assert!(ctx.bearer().is_none());
    }

    #[test]
    fn every_request_carries_a_deadline() {
        let ctx = RpcContext::new(Duration::from_millis(1500));
        let req = ctx.request(());
        assert!(req.metadata().get("grpc-timeout").is_some());
        assert_eq!(ctx.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn one_context_builds_independent_requests() {
        let bearer = authenticate(&headers_with("shared")).unwrap();
        let ctx = RpcContext::new(Duration::from_secs(1)).with_bearer(bearer);

        let mut first = ctx.request("create");
        first.metadata_mut().insert("x-extra", "1".parse().unwrap());
        let second = ctx.request("attach");

        assert_eq!(second.metadata().get("authorization").unwrap(), "shared");
        assert!(second.metadata().get("x-extra").is_none());
    }
}
