//! `djz serve` command implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use djz_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover djz.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build output directory (overrides config).
    #[arg(short, long)]
    dist_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// Serves the built output with the production URL layout (root mount,
    /// theme asset prefix, SPA fallback) until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server cannot start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            dist_dir: self.dist_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let dist_dir = &config.build_resolved.dist_dir;
        if !dist_dir.is_dir() {
            return Err(CliError::Server(format!(
                "build output directory not found: {} (run the client build first)",
                dist_dir.display()
            )));
        }

        let addr = SocketAddr::from_str(&format!("{}:{}", config.server.host, config.server.port))
            .map_err(|e| CliError::Server(format!("invalid bind address: {e}")))?;

        output.info(&format!("Serving {} on http://{addr}", dist_dir.display()));
        output.info("Press Ctrl+C to stop");

        let app = djz_prerender::site_router(dist_dir);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
