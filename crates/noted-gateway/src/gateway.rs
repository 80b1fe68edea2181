//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use noted_proto::{
    AccountsApi, ConversationsApi, GroupsApi, InvitesApi, NotesApi, RecommendationsApi,
};

/// One implementation per backend service.
///
/// Production wires tonic clients here; tests wire in-process spies.
pub struct Backends {
    pub accounts: Arc<dyn AccountsApi>,
    pub groups: Arc<dyn GroupsApi>,
    pub invites: Arc<dyn InvitesApi>,
    pub conversations: Arc<dyn ConversationsApi>,
    pub notes: Arc<dyn NotesApi>,
    pub recommendations: Arc<dyn RecommendationsApi>,
}

/// Read-only state every handler receives. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Gateway {
    accounts: Arc<dyn AccountsApi>,
    groups: Arc<dyn GroupsApi>,
    invites: Arc<dyn InvitesApi>,
    conversations: Arc<dyn ConversationsApi>,
    notes: Arc<dyn NotesApi>,
    recommendations: Arc<dyn RecommendationsApi>,
    rpc_timeout: Duration,
}

impl Gateway {
    #[must_use]
    pub fn new(backends: Backends, rpc_timeout: Duration) -> Self {
        let Backends {
            accounts,
            groups,
            invites,
            conversations,
            notes,
            recommendations,
        } = backends;
        Self {
            accounts,
            groups,
            invites,
            conversations,
            notes,
            recommendations,
            rpc_timeout,
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &dyn AccountsApi {
        self.accounts.as_ref()
    }

    #[must_use]
    pub fn groups(&self) -> &dyn GroupsApi {
        self.groups.as_ref()
    }

    #[must_use]
    pub fn invites(&self) -> &dyn InvitesApi {
        self.invites.as_ref()
    }

    #[must_use]
    pub fn conversations(&self) -> &dyn ConversationsApi {
        self.conversations.as_ref()
    }

    #[must_use]
    pub fn notes(&self) -> &dyn NotesApi {
        self.notes.as_ref()
    }

    #[must_use]
    pub fn recommendations(&self) -> &dyn RecommendationsApi {
        self.recommendations.as_ref()
    }

    /// Deadline attached to every backend call.
    #[must_use]
    pub const fn rpc_timeout(&self) -> Duration {
        self.rpc_timeout
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("rpc_timeout", &self.rpc_timeout)
            .finish_non_exhaustive()
    }
}
