//! Route definitions.

use crate::language::Language;

/// One logical page and its URL segments in each language.
///
/// A page may define several segments per language. The first segment is the
/// canonical one, used whenever an outbound URL is generated; the rest are
/// aliases accepted when matching inbound URLs but never produced.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Stable identifier for the logical page (`"home"`, `"shop"`, ...).
    pub key: &'static str,
    /// English segments, canonical first. The home page uses `[""]`.
    pub en: &'static [&'static str],
    /// Portuguese segments, canonical first.
    pub pt: &'static [&'static str],
    /// True only for the site root.
    pub is_index: bool,
    /// True when the route also matches deeper sub-paths (shop catch-all).
    pub has_wildcard: bool,
    /// Whether the page is included in static snapshots and the sitemap.
    pub prerender: bool,
}

impl RouteDefinition {
    /// A prerendered marketing page with a single segment per language.
    pub(crate) const fn page(
        key: &'static str,
        en: &'static [&'static str],
        pt: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            en,
            pt,
            is_index: false,
            has_wildcard: false,
            prerender: true,
        }
    }

    /// A client-only page: routable, but never snapshotted or listed in the
    /// sitemap (detail pages with dynamic params, commerce and account flows).
    pub(crate) const fn client_only(
        key: &'static str,
        en: &'static [&'static str],
        pt: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            en,
            pt,
            is_index: false,
            has_wildcard: false,
            prerender: false,
        }
    }

    /// All segments configured for a language, canonical first.
    #[must_use]
    pub fn localized_paths(&self, lang: Language) -> &'static [&'static str] {
        match lang {
            Language::En => self.en,
            Language::Pt => self.pt,
        }
    }

    /// The canonical segment for a language.
    ///
    /// Definitions always carry at least one segment per language (the table
    /// test enforces it), so this falls back to the empty segment only for a
    /// malformed hand-built definition.
    #[must_use]
    pub fn canonical_segment(&self, lang: Language) -> &'static str {
        self.localized_paths(lang).first().copied().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIBE: RouteDefinition =
        RouteDefinition::page("zen-tribe", &["zentribe", "tribe"], &["tribo-zen", "tribo"]);

    #[test]
    fn test_localized_paths_returns_all_aliases() {
        assert_eq!(TRIBE.localized_paths(Language::En), &["zentribe", "tribe"]);
        assert_eq!(TRIBE.localized_paths(Language::Pt), &["tribo-zen", "tribo"]);
    }

    #[test]
    fn test_canonical_segment_is_first() {
        assert_eq!(TRIBE.canonical_segment(Language::En), "zentribe");
        assert_eq!(TRIBE.canonical_segment(Language::Pt), "tribo-zen");
    }
}
