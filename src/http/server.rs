//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, HttpServerConfig};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to resolve {target}: {source}")]
    Resolve {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No address found for {0}")]
    NoAddress(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Resolve the configured host and port to a socket address.
///
/// Host names such as `localhost` may resolve to several addresses; IPv4 is
/// preferred, otherwise the first address returned is used.
pub async fn resolve_addr(http: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    let target = http.bind_target();
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&target)
        .await
        .map_err(|source| ServerError::Resolve {
            target: target.clone(),
            source,
        })?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or(ServerError::NoAddress(target))
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down after a SIGTERM/SIGINT.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = resolve_addr(&config.http).await?;
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(
        handle.clone(),
        Duration::from_secs(config.http.shutdown_grace_seconds),
    );

    serve(app, addr, handle).await
}

/// Serve `app` on `addr` until `handle` is shut down.
///
/// Callers keep a clone of `handle` to learn the bound address (useful with
/// port 0) and to trigger shutdown.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    let listening = handle.clone();
    tokio::spawn(async move {
        if let Some(bound) = listening.listening().await {
            tracing::info!("Listening on http://{}", bound);
        }
    });

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let http = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            shutdown_grace_seconds: 1,
        };
        let addr = resolve_addr(&http).await.unwrap();
        assert_eq!(addr, "127.0.0.1:8000".parse().unwrap());
    }

    #[tokio::test]
    async fn test_resolve_localhost_keeps_port() {
        let http = HttpServerConfig {
            host: "localhost".to_string(),
            port: 8000,
            shutdown_grace_seconds: 1,
        };
        let addr = resolve_addr(&http).await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }

    #[tokio::test]
    async fn test_resolve_invalid_host_fails() {
        let http = HttpServerConfig {
            host: "not a host".to_string(),
            port: 8000,
            shutdown_grace_seconds: 1,
        };
        assert!(resolve_addr(&http).await.is_err());
    }
}
