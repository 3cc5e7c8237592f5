//! `djz sitemap` command implementation.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use clap::Args;
use djz_config::{CliSettings, Config};
use djz_routes::{RouteTable, sitemap};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    /// Path to configuration file (default: auto-discover djz.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for sitemap files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Site base URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,
}

impl SitemapArgs {
    /// Execute the sitemap command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the files cannot be
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            public_dir: self.output_dir,
            base_url: self.base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let table = RouteTable::builtin();
        let lastmod = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let pages_xml = sitemap::pages_sitemap(&table, &config.site.base_url, &lastmod);
        let index_xml = sitemap::sitemap_index(&config.site.base_url, &lastmod);

        let public_dir = &config.build_resolved.public_dir;
        std::fs::create_dir_all(public_dir)?;
        std::fs::write(public_dir.join("sitemap-pages.xml"), pages_xml)?;
        std::fs::write(public_dir.join("sitemap.xml"), index_xml)?;

        output.success(&format!(
            "Wrote sitemap.xml and sitemap-pages.xml ({} URLs) to {}",
            table.prerender_entries().count(),
            public_dir.display()
        ));
        Ok(())
    }
}
