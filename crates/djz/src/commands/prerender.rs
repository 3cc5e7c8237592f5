//! `djz prerender` command implementation.

use std::path::PathBuf;

use clap::Args;
use djz_config::{CliSettings, Config};
use djz_prerender::{PrerenderConfig, ProgressSink, RouteOutcome, route_specs};
use djz_routes::RouteTable;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the prerender command.
#[derive(Args)]
pub(crate) struct PrerenderArgs {
    /// Path to configuration file (default: auto-discover djz.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build output directory (overrides config).
    #[arg(short, long)]
    dist_dir: Option<PathBuf>,

    /// Host to bind the local server to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind the local server to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (show server and browser logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl PrerenderArgs {
    /// Execute the prerender command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the run cannot start, or any
    /// route fails to snapshot. The last case is what fails CI builds.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            dist_dir: self.dist_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let table = RouteTable::builtin();
        let specs = route_specs(&table);

        let prerender_config = PrerenderConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            dist_dir: config.build_resolved.dist_dir.clone(),
        };

        output.info(&format!("Server: {}", prerender_config.origin()));
        output.info(&format!("Routes: {}", specs.len()));
        output.info(&format!(
            "Output: {}",
            prerender_config.dist_dir.display()
        ));
        output.separator();

        let progress = ConsoleProgress {
            output: Output::new(),
        };
        let report = djz_prerender::run(&prerender_config, &specs, &progress)?;

        output.separator();
        output.info(&format!(
            "Succeeded: {}/{}",
            report.succeeded(),
            report.outcomes().len()
        ));

        if report.all_succeeded() {
            output.success("All routes snapshotted");
            return Ok(());
        }

        output.error(&format!("Failed: {}", report.failed()));
        for path in report.failed_paths() {
            output.error(&format!("  {path}"));
        }
        Err(CliError::Validation(format!(
            "{} route(s) failed to snapshot",
            report.failed()
        )))
    }
}

/// Narrates driver progress on the terminal.
struct ConsoleProgress {
    output: Output,
}

impl ProgressSink for ConsoleProgress {
    fn attempt_started(&self, path: &str, attempt: u32, attempts: u32) {
        if attempt == 1 {
            self.output.info(&format!("Rendering {path}"));
        } else {
            self.output
                .warning(&format!("Retrying {path} (attempt {attempt}/{attempts})"));
        }
    }

    fn selectors_polled(&self, _path: &str, found: &[String], missing: &[String]) {
        if missing.is_empty() {
            self.output
                .detail(&format!("  selectors rendered: {}", found.join(", ")));
        } else {
            self.output
                .warning(&format!("  selectors missing: {}", missing.join(", ")));
        }
    }

    fn attempt_failed(&self, _path: &str, _attempt: u32, error: &str, will_retry: bool) {
        if will_retry {
            self.output.warning(&format!("  {error}"));
        }
    }

    fn snapshot_written(&self, path: &str, bytes: usize, warnings: &[String]) {
        self.output.success(&format!("  saved {path} ({bytes}B)"));
        for warning in warnings {
            self.output.warning(&format!("  {warning}"));
        }
    }

    fn route_failed(&self, outcome: &RouteOutcome) {
        self.output.error(&format!(
            "  failed {} after {} attempt(s): {}",
            outcome.path,
            outcome.attempts,
            outcome.error.as_deref().unwrap_or("unknown error")
        ));
    }
}
