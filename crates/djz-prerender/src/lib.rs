//! Static HTML snapshot driver.
//!
//! A build step that renders the already-built client bundle through a real
//! headless browser and persists each route as static HTML, so crawlers and
//! first-time visitors get fully formed markup without executing the client
//! application.
//!
//! # Pipeline
//!
//! For every [`RouteSpec`], sequentially:
//!
//! 1. navigate the shared tab to `http://<host>:<port><path>` and wait for
//!    the network to settle
//! 2. poll the route's wait-for selectors until a heading and a footer have
//!    rendered
//! 3. give in-flight API calls a fixed settle delay
//! 4. validate the captured HTML (heading, footer, no dev-server markup)
//! 5. write `<dist>/<route>/index.html`
//!
//! A route gets two attempts with a fixed backoff; a route that exhausts
//! them is recorded as failed and the run moves on. An invalid snapshot is a
//! build failure, not a warning: callers must fail the build when
//! [`RunReport::all_succeeded`] is false, so a broken snapshot can never
//! reach production. Only missing build output aborts the whole run.
//!
//! # Architecture
//!
//! ```text
//! run()
//!  ├─► StaticServer (axum, own runtime)    serves dist/ at / and the
//!  │                                       theme prefix, SPA fallback
//!  ├─► PageDriver (headless_chrome)        one browser, one tab, serial
//!  └─► per route: retry ─► validate ─► write ─► RouteOutcome
//! ```

mod browser;
mod error;
mod progress;
mod report;
mod server;
mod spec;
mod validate;
mod writer;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use browser::PageDriver;
use server::StaticServer;

pub use error::PrerenderError;
pub use progress::{NullProgress, ProgressSink};
pub use report::{RouteOutcome, RunReport};
pub use server::site_router;
pub use spec::{DEFAULT_WAIT_FOR, HOME_MIN_BYTES, PAGE_MIN_BYTES, RouteSpec, route_specs};
pub use validate::{ValidationResult, validate_html};
pub use writer::{snapshot_path, write_snapshot};

use error::AttemptError;

/// Attempts per route before it is recorded as failed.
pub const ATTEMPTS_PER_ROUTE: u32 = 2;

/// Pause between attempts for the same route.
const RETRY_BACKOFF: Duration = Duration::from_secs(3);

/// Budget for each individual wait-for selector.
pub(crate) const SELECTOR_TIMEOUT: Duration = Duration::from_secs(15);

/// Cadence of the selector polling loop.
pub(crate) const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Fixed delay after the critical content renders, letting in-flight API
/// calls for dynamic widgets resolve before capture. A heuristic, not a
/// completion signal; there is no per-call network accounting to wait on.
const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Prerender run configuration.
#[derive(Debug, Clone)]
pub struct PrerenderConfig {
    /// Host the static server binds.
    pub host: String,
    /// Port the static server binds. Must match the origin the client
    /// bundle was built against.
    pub port: u16,
    /// Build output directory; must exist before the run starts.
    pub dist_dir: PathBuf,
}

impl PrerenderConfig {
    /// Origin the browser navigates against.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    fn socket_addr(&self) -> Result<SocketAddr, PrerenderError> {
        SocketAddr::from_str(&format!("{}:{}", self.host, self.port))
            .map_err(|e| PrerenderError::Server(format!("invalid bind address: {e}")))
    }
}

/// Run the driver over a list of route specs.
///
/// Checks preconditions, starts the static server and the browser, renders
/// every route in order, then tears both down regardless of the outcome.
/// Per-route failures do not abort the run; they are collected into the
/// returned [`RunReport`].
///
/// # Errors
///
/// Returns an error when the build output is missing or incomplete, or when
/// the server or browser cannot be started. Preconditions are checked before
/// any server or browser work begins.
pub fn run(
    config: &PrerenderConfig,
    specs: &[RouteSpec],
    progress: &dyn ProgressSink,
) -> Result<RunReport, PrerenderError> {
    if !config.dist_dir.is_dir() {
        return Err(PrerenderError::MissingBuildOutput(config.dist_dir.clone()));
    }
    let index = config.dist_dir.join("index.html");
    if !index.is_file() {
        return Err(PrerenderError::MissingIndex(index));
    }

    let server = StaticServer::start(config.socket_addr()?, &config.dist_dir)?;
    let driver = PageDriver::launch(&config.origin())?;

    let origin = config.origin();
    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        let outcome = run_with_retries(spec, RETRY_BACKOFF, progress, |_attempt| {
            attempt_route(&driver, &origin, &config.dist_dir, spec, progress)
        });
        if !outcome.succeeded() {
            progress.route_failed(&outcome);
        }
        outcomes.push(outcome);
    }

    drop(driver);
    server.shutdown();

    Ok(RunReport::new(outcomes))
}

/// What a successful attempt produced.
struct AttemptSuccess {
    bytes: usize,
    warnings: Vec<String>,
}

/// Drive one route through its attempt budget.
fn run_with_retries<F>(
    spec: &RouteSpec,
    backoff: Duration,
    progress: &dyn ProgressSink,
    mut attempt_fn: F,
) -> RouteOutcome
where
    F: FnMut(u32) -> Result<AttemptSuccess, AttemptError>,
{
    let mut last_error = String::new();

    for attempt in 1..=ATTEMPTS_PER_ROUTE {
        progress.attempt_started(&spec.path, attempt, ATTEMPTS_PER_ROUTE);

        match attempt_fn(attempt) {
            Ok(success) => {
                progress.snapshot_written(&spec.path, success.bytes, &success.warnings);
                return RouteOutcome {
                    path: spec.path.clone(),
                    attempts: attempt,
                    bytes: Some(success.bytes),
                    warnings: success.warnings,
                    error: None,
                };
            }
            Err(err) => {
                let will_retry = attempt < ATTEMPTS_PER_ROUTE;
                last_error = err.to_string();
                tracing::warn!(path = %spec.path, attempt, error = %last_error, "attempt failed");
                progress.attempt_failed(&spec.path, attempt, &last_error, will_retry);
                if will_retry {
                    thread::sleep(backoff);
                }
            }
        }
    }

    RouteOutcome {
        path: spec.path.clone(),
        attempts: ATTEMPTS_PER_ROUTE,
        bytes: None,
        warnings: Vec::new(),
        error: Some(last_error),
    }
}

/// One end-to-end attempt: navigate, wait, settle, validate, write.
fn attempt_route(
    driver: &PageDriver,
    origin: &str,
    dist_dir: &Path,
    spec: &RouteSpec,
    progress: &dyn ProgressSink,
) -> Result<AttemptSuccess, AttemptError> {
    let url = format!("{origin}{}", spec.path);

    preflight(&url)?;
    driver.navigate(&url)?;

    let wait = driver.wait_for_selectors(&spec.wait_for);
    progress.selectors_polled(&spec.path, &wait.found, &wait.missing);
    if !wait.has_critical_content() {
        return Err(AttemptError::Content(format!(
            "critical selectors not rendered (found: [{}], missing: [{}])",
            wait.found.join(", "),
            wait.missing.join(", ")
        )));
    }

    thread::sleep(SETTLE_DELAY);

    let html = driver.content()?;
    let validation = validate_html(&html, spec.min_bytes);
    if !validation.is_valid() {
        return Err(AttemptError::Validation(validation.errors.join("; ")));
    }

    write_snapshot(dist_dir, &spec.path, &html)?;

    Ok(AttemptSuccess {
        bytes: validation.bytes,
        warnings: validation.warnings,
    })
}

/// Cheap status check before committing the browser to a navigation.
///
/// The SPA fallback answers most paths with 200, so this mainly catches a
/// dead or misbound server and non-OK responses for asset-like paths.
fn preflight(url: &str) -> Result<(), AttemptError> {
    match ureq::get(url).call() {
        Ok(_) => Ok(()),
        Err(err) => Err(AttemptError::Navigation(format!("GET {url}: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spec(path: &str) -> RouteSpec {
        RouteSpec {
            path: path.to_owned(),
            min_bytes: 3000,
            wait_for: DEFAULT_WAIT_FOR.to_owned(),
        }
    }

    #[test]
    fn test_missing_build_output_aborts_before_any_server_work() {
        let config = PrerenderConfig {
            host: "127.0.0.1".to_owned(),
            port: 5173,
            dist_dir: PathBuf::from("/nonexistent/dist"),
        };
        let err = run(&config, &[spec("/")], &NullProgress).unwrap_err();
        assert!(matches!(err, PrerenderError::MissingBuildOutput(_)));
    }

    #[test]
    fn test_missing_root_index_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrerenderConfig {
            host: "127.0.0.1".to_owned(),
            port: 5173,
            dist_dir: dir.path().to_path_buf(),
        };
        let err = run(&config, &[spec("/")], &NullProgress).unwrap_err();
        assert!(matches!(err, PrerenderError::MissingIndex(_)));
    }

    #[test]
    fn test_retries_exhaust_the_attempt_budget_then_record_failure() {
        let mut attempts_seen = Vec::new();
        let outcome = run_with_retries(
            &spec("/about"),
            Duration::ZERO,
            &NullProgress,
            |attempt| {
                attempts_seen.push(attempt);
                Err(AttemptError::Navigation("connection refused".to_owned()))
            },
        );

        assert_eq!(attempts_seen, vec![1, 2]);
        assert_eq!(outcome.attempts, ATTEMPTS_PER_ROUTE);
        assert!(!outcome.succeeded());
        assert!(outcome.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_success_on_second_attempt_stops_retrying() {
        let mut calls = 0;
        let outcome = run_with_retries(&spec("/events"), Duration::ZERO, &NullProgress, |_| {
            calls += 1;
            if calls == 1 {
                Err(AttemptError::Validation("missing <footer> marker".to_owned()))
            } else {
                Ok(AttemptSuccess {
                    bytes: 4200,
                    warnings: Vec::new(),
                })
            }
        });

        assert_eq!(calls, 2);
        assert!(outcome.succeeded());
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.bytes, Some(4200));
    }

    #[test]
    fn test_first_attempt_success_uses_one_attempt() {
        let outcome = run_with_retries(&spec("/"), Duration::ZERO, &NullProgress, |_| {
            Ok(AttemptSuccess {
                bytes: 5000,
                warnings: vec!["size 5000B below expected minimum 6000B".to_owned()],
            })
        });

        assert!(outcome.succeeded());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
