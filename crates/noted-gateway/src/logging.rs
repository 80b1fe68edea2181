//! Process-wide `tracing` subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Environment;

/// Install the global subscriber.
///
/// `RUST_LOG` selects what is logged (default `info`). Production writes JSON
/// lines, development writes compact human-readable lines. Calling this twice
/// keeps the first subscriber.
pub fn init(env: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match env {
        Environment::Production => registry.with(fmt::layer().json()).try_init(),
        Environment::Development => registry.with(fmt::layer().compact()).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
