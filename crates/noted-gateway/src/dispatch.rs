//! The one generic handler behind every JSON route.

use std::future::Future;

use axum::extract::State;
use axum::routing::{on, MethodFilter, MethodRouter};
use noted_rest::{Envelope, JsonReply, Route};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tonic::{Request, Response, Status};

use crate::gateway::Gateway;

/// Bind `route` to `filter`, answering with the backend's response as JSON.
///
/// `call` receives the shared state and a request that already carries the
/// deadline and, for authenticated routes, the caller's credential:
///
/// ```ignore
/// rpc(
///     MethodFilter::GET,
///     Route::<GetNoteRequest>::authenticated("GetNote")
///         .bind(|req, env| req.note_id = env.path_param("note_id")),
///     |gw, req| async move { gw.notes().get_note(req).await },
/// )
/// ```
pub fn rpc<M, Res, F, Fut>(filter: MethodFilter, route: Route<M>, call: F) -> MethodRouter<Gateway>
where
    M: DeserializeOwned + Default + Send + 'static,
    Res: Serialize + Send + 'static,
    F: Fn(Gateway, Request<M>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<Res>, Status>> + Send + 'static,
{
    on(
        filter,
        move |State(gateway): State<Gateway>, envelope: Envelope| async move {
            let timeout = gateway.rpc_timeout();
            route
                .dispatch(envelope, timeout, |ctx, message| {
                    call(gateway, ctx.request(message))
                })
                .await
                .map(JsonReply)
        },
    )
}
