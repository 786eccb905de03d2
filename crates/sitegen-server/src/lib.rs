//! Static preview server for sitegen.
//!
//! Serves a built output directory over HTTP with axum and tower-http's
//! `ServeDir`. The server is an explicit start/stop component:
//! [`PreviewServer::start`] binds and spawns the server task, and the
//! returned [`ServerHandle`] stops it and waits for it to finish.
//!
//! # Quick Start
//!
//! ```ignore
//! use sitegen_server::{PreviewServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::new("localhost", 8888, "output");
//!     let mut handle = PreviewServer::start(config).await.unwrap();
//!     println!("Serving at {}", handle.url());
//!
//!     tokio::signal::ctrl_c().await.unwrap();
//!     handle.stop();
//!     handle.wait().await.unwrap();
//! }
//! ```

mod app;
mod error;

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host name or address to bind to.
    pub host: String,
    /// Port to listen on (`0` picks a free port).
    pub port: u16,
    /// Directory served at `/`.
    pub root: PathBuf,
}

impl ServerConfig {
    /// Create a configuration, stripping any URL scheme from `host`.
    pub fn new(host: &str, port: u16, root: impl Into<PathBuf>) -> Self {
        Self {
            host: normalize_host(host),
            port,
            root: root.into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8888,
            root: PathBuf::from("output"),
        }
    }
}

/// Strip an `http://` or `https://` prefix and trailing slashes.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .strip_prefix("http://")
        .or_else(|| host.strip_prefix("https://"))
        .unwrap_or(host);
    host.trim_end_matches('/').to_owned()
}

/// Static file server over a directory.
pub struct PreviewServer;

impl PreviewServer {
    /// Bind the configured address and start serving in a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(config: ServerConfig) -> Result<ServerHandle, ServerError> {
        let address = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { address, source })?;

        tracing::info!(
            address = %local_addr,
            root = %config.root.display(),
            "Starting preview server"
        );

        let app = app::create_router(&config.root);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also stops the server.
                    let _ = shutdown_rx.await;
                    tracing::info!("Shutdown requested, stopping server...");
                })
                .await
        });

        Ok(ServerHandle {
            host: config.host,
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a running [`PreviewServer`].
pub struct ServerHandle {
    host: String,
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Address the server is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Browser URL of the site root, using the configured host name.
    #[must_use]
    pub fn url(&self) -> String {
        let port = self.local_addr.port();
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{port}/", self.host)
        } else {
            format!("http://{}:{port}/", self.host)
        }
    }

    /// Request graceful shutdown. Calling it again has no effect.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) -> Result<(), ServerError> {
        let result = self
            .task
            .await
            .map_err(|e| ServerError::Serve(std::io::Error::other(e)))?;
        result.map_err(ServerError::Serve)?;

        tracing::info!(address = %self.local_addr, "Preview server stopped");
        Ok(())
    }
}
