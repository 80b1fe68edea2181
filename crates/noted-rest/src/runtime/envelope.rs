//! Inbound request envelope.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, MatchedPath, Path, Query, Request};
use axum::http::{HeaderMap, Method};

use super::error::RestError;

/// A fully-read inbound HTTP request.
///
/// Path and query parameters are plain strings; a missing parameter reads as
/// the empty string. When a query key repeats, the last value wins.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    method: Method,
    path_template: Option<String>,
    path: HashMap<String, String>,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
}

/// Pagination window read from `?limit=&offset=`.
///
/// Either value falls back to 0 when absent or not a base-10 integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of items requested.
    pub limit: i32,
    /// Number of items to skip.
    pub offset: i32,
}

impl Envelope {
    /// Build an envelope by hand. Mostly useful in tests; handlers get one
    /// through the [`FromRequest`] extractor.
    #[must_use]
    pub fn new(method: Method, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            headers,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Add a path parameter.
    #[must_use]
    pub fn with_path_param(mut self, name: &str, value: &str) -> Self {
        self.path.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Add a query parameter, replacing any earlier value.
    #[must_use]
    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_owned(), value.to_owned());
        self
    }

    /// HTTP method of the request.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Route template that matched (e.g. `/notes/{note_id}`), if any.
    #[must_use]
    pub fn path_template(&self) -> Option<&str> {
        self.path_template.as_deref()
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw request body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Value of a path parameter, or `""` when the route doesn't bind it.
    #[must_use]
    pub fn path_param(&self, name: &str) -> String {
        self.path.get(name).cloned().unwrap_or_default()
    }

    /// Value of a query parameter, or `""` when absent.
    #[must_use]
    pub fn query_param(&self, name: &str) -> String {
        self.query.get(name).cloned().unwrap_or_default()
    }

    /// Query parameter parsed as an `i32`, or `default` when absent or
    /// unparseable.
    ///
    /// ```
    /// use axum::http::{HeaderMap, Method};
    /// use noted_rest::Envelope;
    ///
    /// let env = Envelope::new(Method::GET, HeaderMap::new(), "")
    ///     .with_query_param("limit", "25")
    ///     .with_query_param("offset", "ten");
    /// assert_eq!(env.query_i32_or("limit", 0), 25);
    /// assert_eq!(env.query_i32_or("offset", 0), 0);
    /// ```
    #[must_use]
    pub fn query_i32_or(&self, name: &str, default: i32) -> i32 {
        self.query
            .get(name)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default)
    }

    /// The `limit`/`offset` pagination window.
    #[must_use]
    pub fn page(&self) -> Page {
        Page {
            limit: self.query_i32_or("limit", 0),
            offset: self.query_i32_or("offset", 0),
        }
    }
}

impl<S> FromRequest<S> for Envelope
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let path_template = parts
            .extensions
            .get::<MatchedPath>()
            .map(|matched| matched.as_str().to_owned());
        // Fallback handlers run outside any matched route and have no params.
        let path = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
            Ok(Path(params)) => params,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(rejection) => return Err(rejection.into()),
        };
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        let method = parts.method.clone();
        let headers = parts.headers.clone();

        let body = Bytes::from_request(Request::from_parts(parts, body), state).await?;

        Ok(Self {
            method,
            path_template,
            path,
            query,
            headers,
            body,
        })
    }
}
