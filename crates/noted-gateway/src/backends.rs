//! tonic channels to the three backend deployments.

use std::sync::Arc;

use noted_proto::{
    AccountsApiClient, ConversationsApiClient, GroupsApiClient, InvitesApiClient, NotesApiClient,
    RecommendationsApiClient,
};
use tonic::transport::{Channel, Endpoint};

use crate::config::{ConfigError, GatewayConfig};
use crate::gateway::Backends;

/// Build one lazily-connected channel per deployment.
///
/// The accounts deployment serves accounts, groups, invites and
/// conversations over a single shared channel. Nothing is dialled until the
/// first request, so an unreachable backend surfaces as `UNAVAILABLE` on
/// that request instead of failing startup.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// [`ConfigError::InvalidBackendAddress`] when an address is not a valid URI.
pub fn connect(config: &GatewayConfig) -> Result<Backends, ConfigError> {
    let accounts = channel(&config.accounts_service_addr, config)?;
    let notes = channel(&config.notes_service_addr, config)?;
    let recommendations = channel(&config.recommendations_service_addr, config)?;

    Ok(Backends {
        accounts: Arc::new(AccountsApiClient::new(accounts.clone())),
        groups: Arc::new(GroupsApiClient::new(accounts.clone())),
        invites: Arc::new(InvitesApiClient::new(accounts.clone())),
        conversations: Arc::new(ConversationsApiClient::new(accounts)),
        notes: Arc::new(NotesApiClient::new(notes)),
        recommendations: Arc::new(RecommendationsApiClient::new(recommendations)),
    })
}

fn channel(addr: &str, config: &GatewayConfig) -> Result<Channel, ConfigError> {
    let endpoint = Endpoint::from_shared(with_scheme(addr)).map_err(|source| {
        ConfigError::InvalidBackendAddress {
            addr: addr.to_owned(),
            source,
        }
    })?;
    tracing::debug!(addr, "configured backend channel");
    Ok(endpoint
        .timeout(config.rpc_timeout())
        .connect_timeout(config.connect_timeout())
        .connect_lazy())
}

/// `host:port` becomes `http://host:port`; anything with a scheme is kept.
fn with_scheme(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_owned()
    } else {
        format!("http://{addr}")
    }
}
