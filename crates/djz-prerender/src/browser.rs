//! Headless browser page driver.
//!
//! One browser process and one tab are launched up front and reused for the
//! whole run; routes are rendered strictly in sequence. The tab is prepared
//! once with the runtime config bootstrap and asset interception before the
//! first navigation.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Instant;

use headless_chrome::browser::tab::RequestPausedDecision;
use headless_chrome::browser::transport::{SessionId, Transport};
use headless_chrome::protocol::cdp::Fetch::events::RequestPausedEvent;
use headless_chrome::protocol::cdp::Fetch::{FailRequest, RequestPattern, RequestStage};
use headless_chrome::protocol::cdp::Network::{ErrorReason, ResourceType};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::error::{AttemptError, PrerenderError};
use crate::{SELECTOR_POLL_INTERVAL, SELECTOR_TIMEOUT};

/// User agent the snapshots are rendered under.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; ZenPrerender/1.0; +https://djzeneyer.com)";

/// Result of the content wait phase.
#[derive(Debug)]
pub(crate) struct SelectorWait {
    /// Selectors that rendered within their timeout.
    pub found: Vec<String>,
    /// Selectors that never appeared.
    pub missing: Vec<String>,
}

impl SelectorWait {
    /// The page counts as rendered only when both a heading and a footer
    /// selector were found; anything less is a skeleton.
    pub(crate) fn has_critical_content(&self) -> bool {
        self.found.iter().any(|s| s.contains("h1")) && self.found.iter().any(|s| s.contains("footer"))
    }
}

/// The shared browser tab and the operations the driver needs from it.
pub(crate) struct PageDriver {
    // Owns the browser process; dropping it tears Chrome down.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl PageDriver {
    /// Launch the browser and prepare the single shared tab.
    ///
    /// `origin` is the local server origin the mock runtime config points
    /// at, so client code that reads host configuration sees the same shape
    /// it gets from the production host.
    pub(crate) fn launch(origin: &str) -> Result<Self, PrerenderError> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| PrerenderError::Browser(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| PrerenderError::Browser(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| PrerenderError::Browser(e.to_string()))?;

        tab.set_user_agent(USER_AGENT, None, None)
            .map_err(|e| PrerenderError::Browser(e.to_string()))?;

        // Registered before any navigation so every document sees it before
        // the application bundle runs
        tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: runtime_config_bootstrap(origin),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        })
        .map_err(|e| PrerenderError::Browser(e.to_string()))?;

        let patterns = vec![RequestPattern {
            url_pattern: Some("*".to_owned()),
            resource_Type: None,
            request_stage: Some(RequestStage::Request),
        }];
        tab.enable_fetch(Some(&patterns), None)
            .map_err(|e| PrerenderError::Browser(e.to_string()))?;
        tab.enable_request_interception(Arc::new(intercept_asset_requests))
            .map_err(|e| PrerenderError::Browser(e.to_string()))?;

        tracing::info!("Browser launched");

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    /// Navigate to a URL and wait until network activity settles.
    pub(crate) fn navigate(&self, url: &str) -> Result<(), AttemptError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| AttemptError::Navigation(format!("{url}: {e}")))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| AttemptError::Navigation(format!("{url}: {e}")))?;
        Ok(())
    }

    /// Poll every selector in a comma-separated list until it renders or its
    /// timeout expires.
    ///
    /// Each selector gets its own timeout budget; polling at a short
    /// interval tolerates late client-side rendering instead of requiring
    /// the element to exist on first paint.
    pub(crate) fn wait_for_selectors(&self, wait_for: &str) -> SelectorWait {
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for selector in wait_for.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if self.poll_selector(selector) {
                found.push(selector.to_owned());
            } else {
                tracing::debug!(selector, "selector never appeared");
                missing.push(selector.to_owned());
            }
        }

        SelectorWait { found, missing }
    }

    fn poll_selector(&self, selector: &str) -> bool {
        let deadline = Instant::now() + SELECTOR_TIMEOUT;
        loop {
            if self.tab.find_element(selector).is_ok() {
                return true;
            }
            if Instant::now() + SELECTOR_POLL_INTERVAL > deadline {
                return false;
            }
            std::thread::sleep(SELECTOR_POLL_INTERVAL);
        }
    }

    /// Capture the rendered document as HTML.
    pub(crate) fn content(&self) -> Result<String, AttemptError> {
        self.tab
            .get_content()
            .map_err(|e| AttemptError::Content(format!("could not capture page content: {e}")))
    }
}

/// Script that installs the mock runtime config into a new document.
///
/// Mirrors the payload the production host injects alongside the bundle:
/// the client reads `window.wpData` for API endpoints and session state.
fn runtime_config_bootstrap(origin: &str) -> String {
    let config = serde_json::json!({
        "siteUrl": format!("{origin}/"),
        "restUrl": format!("{origin}/wp-json/"),
        "nonce": "prerender",
        "themeUrl": format!("{origin}/wp-content/themes/zentheme"),
        "isUserLoggedIn": false,
        "currentUser": null,
    });
    format!("window.wpData = {config};")
}

/// Abort image, font and media requests; pass everything else through.
///
/// Snapshots only need markup, and the heavy asset fetches dominate page
/// load time.
fn intercept_asset_requests(
    _transport: Arc<Transport>,
    _session_id: SessionId,
    event: RequestPausedEvent,
) -> RequestPausedDecision {
    let blocked = matches!(
        event.params.resource_Type,
        ResourceType::Image | ResourceType::Font | ResourceType::Media
    );

    if blocked {
        RequestPausedDecision::Fail(FailRequest {
            request_id: event.params.request_id,
            error_reason: ErrorReason::Aborted,
        })
    } else {
        RequestPausedDecision::Continue(None)
    }
}
