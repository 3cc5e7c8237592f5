//! Prerender error types.

use std::path::PathBuf;

/// Fatal errors that abort a prerender run before or during setup.
///
/// Per-route failures are not errors at this level; they are collected into
/// the run report so the remaining routes still get their chance.
#[derive(Debug, thiserror::Error)]
pub enum PrerenderError {
    /// The client build output directory does not exist.
    #[error("build output directory not found: {} (run the client build first)", .0.display())]
    MissingBuildOutput(PathBuf),

    /// The build output has no root `index.html` to serve as SPA fallback.
    #[error("root index.html not found: {} (build output is incomplete)", .0.display())]
    MissingIndex(PathBuf),

    /// The static file server could not be started.
    #[error("static server error: {0}")]
    Server(String),

    /// The headless browser could not be launched or configured.
    #[error("browser error: {0}")]
    Browser(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single snapshot attempt. Consumes one retry.
#[derive(Debug, thiserror::Error)]
pub(crate) enum AttemptError {
    /// The page could not be loaded at all.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The page loaded but its essential content never appeared.
    #[error("content not ready: {0}")]
    Content(String),

    /// The captured HTML failed structural validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The snapshot could not be written.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
