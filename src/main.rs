// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info, warn};

use wallet_binding_gateway::{
    api::router,
    config::GatewayConfig,
    state::AppState,
    telemetry::{init_tracing, LogFormat},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::from_env());

    // Install the ring crypto provider for rustls before any TLS operations
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            process::exit(1);
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to initialise services");
            process::exit(1);
        }
    };
    let app = router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received, draining connections");
        shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let addr = config.server.addr;
    let served = match &config.server.tls {
        Some(tls) => {
            let tls_config = match RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await
            {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    error!(error = %e, cert = %tls.cert_path.display(), "failed to load TLS credentials");
                    process::exit(1);
                }
            };
            info!(%addr, backend = %config.backend.base_url, "wallet binding gateway listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!(%addr, backend = %config.backend.base_url, "wallet binding gateway listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    if let Err(e) = served {
        error!(error = %e, "server failed");
        process::exit(1);
    }
    info!("server stopped");
}

async fn shutdown_signal() {
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
}
