//! `api-gateway` binary.

#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use noted_gateway::config::Cli;
use noted_gateway::{backends, logging, router, Gateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse()
        .resolve()
        .context("failed to load configuration")?;
    logging::init(config.env);

    let backends = backends::connect(&config).context("failed to configure backends")?;
    let gateway = Gateway::new(backends, config.rpc_timeout());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        env = ?config.env,
        accounts = %config.accounts_service_addr,
        notes = %config.notes_service_addr,
        recommendations = %config.recommendations_service_addr,
        "starting api-gateway"
    );

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("graceful shutdown");
}
