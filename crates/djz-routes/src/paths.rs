//! URL path construction.

use crate::language::Language;

/// Build the full URL path for a segment in a language.
///
/// The empty segment is the home page and produces exactly the language
/// prefix: `"/"` for English, `"/pt"` for Portuguese. No double slashes and
/// no trailing slash are ever produced.
///
/// ```
/// use djz_routes::{Language, build_full_path};
///
/// assert_eq!(build_full_path("", Language::En), "/");
/// assert_eq!(build_full_path("", Language::Pt), "/pt");
/// assert_eq!(build_full_path("about", Language::En), "/about");
/// assert_eq!(build_full_path("sobre", Language::Pt), "/pt/sobre");
/// ```
#[must_use]
pub fn build_full_path(segment: &str, lang: Language) -> String {
    let prefix = lang.prefix();
    if segment.is_empty() {
        return prefix.to_owned();
    }
    if prefix == "/" {
        format!("/{segment}")
    } else {
        format!("{prefix}/{segment}")
    }
}

/// Whether `path` is `candidate` itself or nested below it.
///
/// Nesting requires a `/` boundary, so `/shop/product/x` matches `/shop` but
/// `/shopping` does not.
pub(crate) fn matches_or_nested(path: &str, candidate: &str) -> bool {
    if path == candidate {
        return true;
    }
    match path.strip_prefix(candidate) {
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
