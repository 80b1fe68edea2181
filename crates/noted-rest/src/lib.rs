//! REST ↔ gRPC translation core for the noted API gateway.
//!
//! Everything a route handler needs to turn an inbound HTTP request into a
//! unary gRPC call and the call's outcome back into an HTTP response:
//!
//! - [`Envelope`]: the fully-read inbound request (path, query, headers, body)
//! - [`authenticate`] / [`RpcContext`]: bearer extraction and propagation as
//!   `authorization` metadata, with a per-call deadline
//! - [`decode`] / [`encode`] / [`JsonReply`] / [`FileReply`]: the body codec
//! - [`Route`]: the generic auth → parse → invoke → translate contract
//! - [`RestError`]: every failure a handler can produce, rendered as
//!   `{"error": "<message>"}`
//! - [`grpc_to_http_status`] / [`http_status_or`]: the status taxonomy table
//!
//! # Usage
//!
//! ```ignore
//! let route = Route::authenticated("GetNote")
//!     .bind(|req: &mut GetNoteRequest, env| req.note_id = env.path_param("note_id"));
//!
//! let note = route
//!     .dispatch(envelope, timeout, |ctx, req| notes.get_note(ctx.request(req)))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod runtime;

pub use runtime::*;

/// Serde adapters for prost well-known types and proto3 enums.
///
/// - `timestamp` / `opt_timestamp`: `Timestamp` ↔ RFC 3339
/// - `field_mask` / `opt_field_mask`: `FieldMask` ↔ `"title,blocks"`
///
/// Also provides the [`proto_enum_serde`] macro for proto enum `#[serde(with)]` modules.
#[cfg(feature = "serde")]
pub mod serde;
