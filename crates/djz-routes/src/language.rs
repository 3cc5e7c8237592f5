//! Site languages.

use std::fmt;

/// A language the site is published in.
///
/// English lives at the URL root, Portuguese under the `/pt` prefix. There is
/// no `/en` prefix: the root path already is the English site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English (default, served at the root).
    #[default]
    En,
    /// Brazilian Portuguese (served under `/pt`).
    Pt,
}

impl Language {
    /// Fold an arbitrary language tag onto one of the two supported codes.
    ///
    /// The input is trimmed and lowercased; anything starting with `pt`
    /// (`"pt"`, `"PT-br"`, `"pt_PT"`) maps to [`Language::Pt`], everything
    /// else, including empty or malformed input, maps to [`Language::En`].
    /// Total and idempotent over its own output.
    #[must_use]
    pub fn normalize(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.starts_with("pt") {
            Self::Pt
        } else {
            Self::En
        }
    }

    /// URL prefix for this language: `"/"` for English, `"/pt"` for Portuguese.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::En => "/",
            Self::Pt => "/pt",
        }
    }

    /// Two-letter language code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }

    /// Locale identifier used in `og:locale` style metadata.
    #[must_use]
    pub fn locale(self) -> &'static str {
        match self {
            Self::En => "en_US",
            Self::Pt => "pt_BR",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_portuguese_variants() {
        assert_eq!(Language::normalize("pt"), Language::Pt);
        assert_eq!(Language::normalize("PT"), Language::Pt);
        assert_eq!(Language::normalize("pt-BR"), Language::Pt);
        assert_eq!(Language::normalize("PT-br"), Language::Pt);
        assert_eq!(Language::normalize("  pt_PT  "), Language::Pt);
    }

    #[test]
    fn test_normalize_everything_else_is_english() {
        assert_eq!(Language::normalize("en"), Language::En);
        assert_eq!(Language::normalize("en-US"), Language::En);
        assert_eq!(Language::normalize(""), Language::En);
        assert_eq!(Language::normalize("fr"), Language::En);
        assert_eq!(Language::normalize("  "), Language::En);
        assert_eq!(Language::normalize("português"), Language::En);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for tag in ["pt-BR", "en-US", "", "fr", "PT"] {
            let once = Language::normalize(tag);
            assert_eq!(Language::normalize(once.as_str()), once);
        }
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Language::En.prefix(), "/");
        assert_eq!(Language::Pt.prefix(), "/pt");
    }
}
