//! sitegen CLI - static site generator.
//!
//! Converts a directory of markdown documents into a static HTML site and
//! optionally serves it for local preview.

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use sitegen_config::{CliSettings, Config};
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// sitegen - Static site generator.
#[derive(Parser, Debug)]
#[command(name = "sitegen", version, about)]
struct Cli {
    /// Directory containing the markdown content files.
    content_dir: Option<PathBuf>,

    /// Name of the website.
    #[arg(short, long)]
    name: Option<String>,

    /// Directory the HTML files are written to.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CSS theme file (default: built-in light theme).
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Address the preview server binds to.
    #[arg(short = 'H', long, env = "SITEGEN_HOST")]
    host: Option<String>,

    /// Port the preview server listens on.
    #[arg(short, long, env = "SITEGEN_PORT")]
    port: Option<u16>,

    /// Launch a local preview server after building.
    #[arg(short, long)]
    start: bool,

    /// Do not open the browser when the server starts.
    #[arg(long)]
    no_browser: bool,

    /// Path to configuration file (default: auto-discover sitegen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// CLI settings overriding the configuration file.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            name: self.name.clone(),
            content_dir: self.content_dir.clone(),
            output_dir: self.output.clone(),
            theme: self.theme.clone(),
            host: self.host.clone(),
            port: self.port,
            open_browser: self.no_browser.then_some(false),
        }
    }

    /// Build the site, then serve it if requested.
    fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        let output_dir = commands::build::run(&config, output)?;

        if self.start {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(commands::serve::run(&config, &output_dir, output))?;
        }

        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.failed(&err);
        std::process::exit(1);
    }
}
