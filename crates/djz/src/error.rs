//! CLI error types.

use djz_config::ConfigError;
use djz_prerender::PrerenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Prerender(#[from] PrerenderError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
