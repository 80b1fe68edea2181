//! Runtime types shared by every gateway route.
//!
//! - [`Envelope`]: Extracted inbound request
//! - [`Bearer`] / [`RpcContext`]: Credential propagation to gRPC metadata
//! - [`decode`] / [`encode`]: JSON body codec
//! - [`Route`]: Generic handler contract
//! - [`RestError`]: Error type that renders `{"error": "..."}` responses
//! - [`grpc_to_http_status`]: Maps gRPC status codes to HTTP status codes

mod bearer;
mod codec;
mod envelope;
mod error;
mod route;
mod status_map;

pub use bearer::{authenticate, Bearer, RpcContext, AUTHORIZATION_METADATA_KEY};
pub use codec::{decode, encode, FileReply, JsonReply, JSON_CONTENT_TYPE};
pub use envelope::{Envelope, Page};
pub use error::RestError;
pub use route::{Auth, BodyPolicy, Route};
pub use status_map::{grpc_code_name, grpc_to_http_status, http_status_or, STATUS_TABLE};
