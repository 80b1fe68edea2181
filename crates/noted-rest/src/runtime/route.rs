//! Generic route contract: authenticate, parse, invoke, translate.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tonic::{Response, Status};

use super::bearer::{authenticate, RpcContext};
use super::codec::decode;
use super::envelope::Envelope;
use super::error::RestError;
use super::status_map::grpc_code_name;

/// Whether a route requires a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Missing `Authorization` fails with 401 before anything else happens.
    Required,
    /// No credential is read or forwarded.
    Public,
}

/// How a route treats the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// The body is never read; the request message starts from its default.
    Ignored,
    /// The body is decoded as JSON into the request message.
    Json,
}

type Bind<M> = fn(&mut M, &Envelope);
type Parse<M> = fn(&mut M, &Envelope) -> Result<(), RestError>;

/// Declarative description of one REST operation over request message `M`.
///
/// A route runs the same pipeline every time:
///
/// 1. authenticate (only for [`Auth::Required`])
/// 2. build `M` from the body (or default it)
/// 3. overwrite fields from path/query parameters
/// 4. validate parameters that have a closed set of values
/// 5. call the backend once with the credential and deadline attached
///
/// [`Route::dispatch`] runs all five steps. Handlers that need more than one
/// backend call use [`Route::prepare`] and then [`Route::invoke`] per call.
///
/// Path parameters are bound after decoding, so a path id always wins over a
/// conflicting id in the body.
///
/// ```ignore
/// Route::<UpdateNoteRequest>::authenticated("UpdateNote")
///     .json_body()
///     .bind(|req, env| req.note_id = env.path_param("note_id"))
/// ```
pub struct Route<M> {
    name: &'static str,
    auth: Auth,
    body: BodyPolicy,
    bind: Bind<M>,
    parse: Parse<M>,
}

impl<M> Clone for Route<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Route<M> {}

impl<M> std::fmt::Debug for Route<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("auth", &self.auth)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl<M> Route<M> {
    fn new(name: &'static str, auth: Auth) -> Self {
        Self {
            name,
            auth,
            body: BodyPolicy::Ignored,
            bind: |_, _| {},
            parse: |_, _| Ok(()),
        }
    }

    /// Route that rejects requests without a credential.
    #[must_use]
    pub fn authenticated(name: &'static str) -> Self {
        Self::new(name, Auth::Required)
    }

    /// Route callable without a credential.
    #[must_use]
    pub fn public(name: &'static str) -> Self {
        Self::new(name, Auth::Public)
    }

    /// Decode the request body as JSON into the message.
    #[must_use]
    pub fn json_body(mut self) -> Self {
        self.body = BodyPolicy::Json;
        self
    }

    /// Copy path and query parameters into the message.
    #[must_use]
    pub fn bind(mut self, bind: Bind<M>) -> Self {
        self.bind = bind;
        self
    }

    /// Validate parameters that can be rejected with 400 before any backend call.
    #[must_use]
    pub fn try_bind(mut self, parse: Parse<M>) -> Self {
        self.parse = parse;
        self
    }

    /// Operation name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Credential requirement.
    #[must_use]
    pub const fn auth(&self) -> Auth {
        self.auth
    }

    /// Body handling.
    #[must_use]
    pub const fn body_policy(&self) -> BodyPolicy {
        self.body
    }
}

impl<M> Route<M>
where
    M: DeserializeOwned + Default,
{
    /// Steps 1 to 4: the call context and the fully-built request message.
    ///
    /// Compound operations use this directly and then issue their own calls
    /// with the returned context.
    ///
    /// # Errors
    ///
    /// [`RestError::Unauthenticated`], [`RestError::InvalidJson`] or
    /// [`RestError::InvalidParameter`]; the backend has not been called.
    pub fn prepare(&self, envelope: &Envelope, timeout: Duration) -> Result<(RpcContext, M), RestError> {
        let ctx = match self.auth {
            Auth::Required => RpcContext::new(timeout).with_bearer(authenticate(envelope.headers())?),
            Auth::Public => RpcContext::new(timeout),
        };

        let mut message = match self.body {
            BodyPolicy::Json => decode(envelope.body())?,
            BodyPolicy::Ignored => M::default(),
        };
        (self.bind)(&mut message, envelope);
        (self.parse)(&mut message, envelope)?;

        Ok((ctx, message))
    }

    /// Run the whole pipeline and return the backend's response message.
    ///
    /// # Errors
    ///
    /// Any error from [`Route::prepare`], or [`RestError::Rpc`] carrying the
    /// backend's status.
    pub async fn dispatch<Res, F, Fut>(
        &self,
        envelope: Envelope,
        timeout: Duration,
        call: F,
    ) -> Result<Res, RestError>
    where
        F: FnOnce(RpcContext, M) -> Fut,
        Fut: Future<Output = Result<Response<Res>, Status>>,
    {
        let (ctx, message) = self.prepare(&envelope, timeout)?;
        tracing::debug!(operation = self.name, "dispatching backend call");
        self.invoke(call(ctx, message)).await
    }

    /// Step 5 on its own: await one backend call and unwrap its response.
    ///
    /// # Errors
    ///
    /// [`RestError::Rpc`] carrying the backend's status.
    pub async fn invoke<Res, Fut>(&self, call: Fut) -> Result<Res, RestError>
    where
        Fut: Future<Output = Result<Response<Res>, Status>>,
    {
        match call.await {
            Ok(response) => Ok(response.into_inner()),
            Err(status) => {
                tracing::warn!(
                    operation = self.name,
                    code = grpc_code_name(status.code()),
                    error = status.message(),
                    "backend call failed"
                );
                Err(RestError::Rpc(status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use axum::http::{HeaderMap, Method, StatusCode};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use tonic::Request;

    #[derive(Debug, Default, Clone, PartialEq, Deserialize)]
    #[serde(default)]
    struct UpdateNoteRequest {
        note_id: String,
        title: String,
    }

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn update_note() -> Route<UpdateNoteRequest> {
        Route::authenticated("UpdateNote")
            .json_body()
            .bind(|req, env| req.note_id = env.path_param("note_id"))
    }

    fn authorized(body: &'static str) -> Envelope {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer t".parse().unwrap());
        Envelope::new(Method::PATCH, headers, body).with_path_param("note_id", "n1")
    }

    #[tokio::test]
    async fn missing_credential_never_calls_backend() {
        let calls = AtomicUsize::new(0);
        let envelope = Envelope::new(Method::PATCH, HeaderMap::new(), "{}");

        let err = update_note()
            .dispatch(envelope, TIMEOUT, |_, req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Status>(Response::new(req)) }
            })
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_body_never_calls_backend() {
        let calls = AtomicUsize::new(0);

        let err = update_note()
            .dispatch(authorized("{\"title\":"), TIMEOUT, |_, req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Status>(Response::new(req)) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::InvalidJson(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn path_parameter_overrides_body() {
        let seen = update_note()
            .dispatch(
                authorized(r#"{"note_id":"other","title":"T"}"#),
                TIMEOUT,
                |_, req| async move { Ok::<_, Status>(Response::new(req)) },
            )
            .await
            .unwrap();

        assert_eq!(
            seen,
            UpdateNoteRequest {
                note_id: "n1".to_owned(),
                title: "T".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn ignored_body_is_not_decoded() {
        let route: Route<UpdateNoteRequest> =
            Route::authenticated("GetNote").bind(|req, env| req.note_id = env.path_param("note_id"));

        let seen = route
            .dispatch(authorized("not json at all"), TIMEOUT, |_, req| async move {
                Ok::<_, Status>(Response::new(req))
            })
            .await
            .unwrap();

        assert_eq!(seen.note_id, "n1");
        assert_eq!(seen.title, "");
    }

    #[tokio::test]
    async fn credential_and_deadline_reach_the_request() {
        let captured: Mutex<Option<Request<UpdateNoteRequest>>> = Mutex::new(None);

        update_note()
            .dispatch(authorized("{}"), TIMEOUT, |ctx, req| {
                *captured.lock().unwrap() = Some(ctx.request(req));
                async { Ok::<_, Status>(Response::new(())) }
            })
            .await
            .unwrap();

        let request = captured.lock().unwrap().take().unwrap();
        assert_eq!(request.metadata().get("authorization").unwrap(), "Bearer t");
        assert!(request.metadata().get("grpc-timeout").is_some());
    }

    #[tokio::test]
    async fn public_route_forwards_no_credential() {
        let route: Route<UpdateNoteRequest> = Route::public("CreateAccount").json_body();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer ignored".parse().unwrap());

        let forwarded = route
            .dispatch(
                Envelope::new(Method::POST, headers, "{}"),
                TIMEOUT,
                |ctx, _| async move { Ok::<_, Status>(Response::new(ctx.bearer().is_some())) },
            )
            .await
            .unwrap();

        assert!(!forwarded);
    }

    #[tokio::test]
    async fn backend_status_is_carried_through() {
        let err = update_note()
            .dispatch(authorized("{}"), TIMEOUT, |_, _| async {
                Err::<Response<()>, _>(Status::failed_precondition("note is locked"))
            })
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), StatusCode::FAILED_DEPENDENCY);
        assert_eq!(err.message(), "note is locked");
    }

    #[tokio::test]
    async fn try_bind_rejects_before_backend() {
        let calls = AtomicUsize::new(0);
        let route = update_note().try_bind(|req, _| {
            if req.title.is_empty() {
                return Err(RestError::InvalidParameter {
                    name: "title",
                    message: "title required".to_owned(),
                });
            }
            Ok(())
        });

        let err = route
            .dispatch(authorized("{}"), TIMEOUT, |_, req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Status>(Response::new(req)) }
            })
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "title required");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn builders_record_policy() {
        let route = update_note();
        assert_eq!(route.name(), "UpdateNote");
        assert_eq!(route.auth(), Auth::Required);
        assert_eq!(route.body_policy(), BodyPolicy::Json);
    }
}
