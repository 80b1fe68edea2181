//! The HTTP surface, one module per backend resource.

mod accounts;
mod conversations;
mod export;
mod groups;
mod invites;
mod notes;
mod recommendations;

use axum::Router;

use crate::gateway::Gateway;

/// Every REST route, still waiting for its state.
pub(crate) fn router() -> Router<Gateway> {
    Router::new()
        .merge(accounts::router())
        .merge(groups::router())
        .merge(invites::router())
        .merge(notes::router())
        .merge(conversations::router())
        .merge(recommendations::router())
}
