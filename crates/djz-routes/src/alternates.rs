//! Hreflang alternate link resolution.

use crate::language::Language;
use crate::paths::build_full_path;
use crate::table::{RouteTable, strip_pt_prefix};

/// The same logical page's URL in every published language.
///
/// Rendered into `<link rel="alternate" hreflang="...">` tags. `x_default`
/// is the language-neutral fallback and points at the English URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLinks {
    /// English URL path.
    pub en: String,
    /// Portuguese URL path.
    pub pt: String,
    /// Language-neutral fallback URL path.
    pub x_default: String,
}

impl AlternateLinks {
    /// The path for a given language.
    #[must_use]
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Pt => &self.pt,
        }
    }

    /// All three links echo the input path.
    fn identity(path: &str) -> Self {
        Self {
            en: path.to_owned(),
            pt: path.to_owned(),
            x_default: path.to_owned(),
        }
    }
}

impl RouteTable {
    /// Compute the per-language alternates for the page at `current_path`.
    ///
    /// The home page is special-cased to `/` for every language. For any
    /// other path, the `/pt` prefix and surrounding slashes are stripped and
    /// the bare segment is matched against the canonical segments of every
    /// route, in declaration order; path-prefix matches are accepted so
    /// detail URLs resolve to their listing's alternates.
    ///
    /// Never fails: an unknown path is echoed back unchanged for every
    /// language rather than breaking navigation. The current language does
    /// not influence the result; it is accepted so callers resolving from a
    /// request context do not need to care.
    #[must_use]
    pub fn alternate_links(&self, current_path: &str, _current_language: Language) -> AlternateLinks {
        if current_path.is_empty() || current_path == "/" {
            return AlternateLinks {
                en: "/".to_owned(),
                pt: "/".to_owned(),
                x_default: "/".to_owned(),
            };
        }

        let bare = strip_pt_prefix(current_path)
            .unwrap_or(current_path)
            .trim_matches('/');

        for route in self.routes() {
            for lang in [Language::En, Language::Pt] {
                let segment = route.canonical_segment(lang);
                let is_match = if segment.is_empty() {
                    bare.is_empty()
                } else {
                    bare == segment || bare.starts_with(&format!("{segment}/"))
                };
                if is_match {
                    let en = build_full_path(route.canonical_segment(Language::En), Language::En);
                    let pt = build_full_path(route.canonical_segment(Language::Pt), Language::Pt);
                    return AlternateLinks {
                        x_default: en.clone(),
                        en,
                        pt,
                    };
                }
            }
        }

        AlternateLinks::identity(current_path)
    }
}
