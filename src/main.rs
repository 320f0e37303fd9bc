// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tint_web::{
    config::ServerConfig,
    identity::NodeIdentity,
    logging,
    peer::InMemoryPeer,
    site,
    state::AppState,
};
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    logging::init(config.log_format)?;

    let identity = match &config.peer_key_file {
        Some(path) => NodeIdentity::load(path)?,
        None => {
            warn!("PEER_KEY_FILE not set, using an ephemeral node key");
            NodeIdentity::generate()?
        }
    };
    info!(key_id = %identity.key_id(), "node identity loaded");

    let state = AppState::from_peer(Arc::new(InMemoryPeer::new(identity)));
    let app = site::router(state, &config.static_dir);

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "Failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file).await?;

            info!(%addr, "tint web listening on https (docs at /api/docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!(%addr, "tint web listening on http (docs at /api/docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
