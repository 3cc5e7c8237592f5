//! djz CLI - Site toolkit.
//!
//! Provides commands for:
//! - `prerender`: Snapshot the built client routes to static HTML
//! - `sitemap`: Generate sitemap XML from the route table
//! - `serve`: Preview the built output with the production URL layout

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PrerenderArgs, ServeArgs, SitemapArgs};
use output::Output;

/// djz - Site toolkit.
#[derive(Parser)]
#[command(name = "djz", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot the built client routes to static HTML.
    Prerender(PrerenderArgs),
    /// Generate sitemap XML from the route table.
    Sitemap(SitemapArgs),
    /// Preview the built output locally.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for the command
    let verbose = match &cli.command {
        Commands::Prerender(args) => args.verbose,
        Commands::Serve(args) => args.verbose,
        Commands::Sitemap(_) => false,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Prerender(args) => args.execute(),
        Commands::Sitemap(args) => args.execute(),
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
