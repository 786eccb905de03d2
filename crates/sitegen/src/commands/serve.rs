//! Preview server step.

use std::path::Path;

use sitegen_config::Config;
use sitegen_server::{PreviewServer, ServerConfig};

use crate::error::CliError;
use crate::output::Output;

/// Serve `root` until Ctrl+C, then shut down gracefully.
pub(crate) async fn run(config: &Config, root: &Path, output: &Output) -> Result<(), CliError> {
    let server_config = ServerConfig::new(&config.server.host, config.server.port, root);
    let mut handle = PreviewServer::start(server_config).await?;

    let url = handle.url();
    output.serving(&url);

    if config.server.open_browser
        && let Err(err) = webbrowser::open(&url)
    {
        output.browser_unavailable(&err);
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping server...");

    handle.stop();
    handle.wait().await?;

    output.stopped();
    Ok(())
}
