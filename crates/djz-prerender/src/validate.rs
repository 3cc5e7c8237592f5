//! Structural validation of captured HTML.

use std::sync::LazyLock;

use regex::Regex;

/// Markup only a dev server emits. Its presence means the snapshot was taken
/// against an unbuilt bundle and must never reach production.
const DEV_SERVER_MARKER: &str = "/@vite/client";

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<footer\b").unwrap());

/// Outcome of validating one captured snapshot.
///
/// Created fresh per attempt. Errors fail the attempt; warnings are reported
/// but do not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Fatal structural problems.
    pub errors: Vec<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
    /// UTF-8 byte size of the captured HTML.
    pub bytes: usize,
}

impl ValidationResult {
    /// Whether the snapshot may be written to disk.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a captured page against the structural rules.
///
/// Hard rules: a non-empty `<h1>`, a footer marker, and no dev-server
/// markup. Soft rule: the output should be at least `min_bytes` long.
#[must_use]
pub fn validate_html(html: &str, min_bytes: usize) -> ValidationResult {
    let mut result = ValidationResult {
        bytes: html.len(),
        ..ValidationResult::default()
    };

    if !has_heading_with_content(html) {
        result
            .errors
            .push("missing <h1> with text content".to_owned());
    }

    if !FOOTER_RE.is_match(html) {
        result.errors.push("missing <footer> marker".to_owned());
    }

    if html.contains(DEV_SERVER_MARKER) {
        result.errors.push(format!(
            "development server markup detected ({DEV_SERVER_MARKER})"
        ));
    }

    if result.bytes < min_bytes {
        result.warnings.push(format!(
            "size {}B below expected minimum {min_bytes}B",
            result.bytes
        ));
    }

    result
}

/// Whether the document has at least one `<h1>` whose inner text is
/// non-empty once nested tags are stripped.
fn has_heading_with_content(html: &str) -> bool {
    H1_RE.captures_iter(html).any(|captures| {
        let inner = captures.get(1).map_or("", |m| m.as_str());
        !TAG_RE.replace_all(inner, "").trim().is_empty()
    })
}
