//! The route table and lookups over it.

use crate::definition::RouteDefinition;
use crate::language::Language;
use crate::paths::{build_full_path, matches_or_nested};

/// Every logical page of the site, in declaration order.
///
/// Declaration order is load-bearing: [`RouteTable::find_by_path`] returns
/// the first structural match, so detail routes are declared before the
/// listing routes whose segments prefix them.
const ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        key: "home",
        en: &[""],
        pt: &[""],
        is_index: true,
        has_wildcard: false,
        prerender: true,
    },
    RouteDefinition::page("about", &["about"], &["sobre"]),
    RouteDefinition::page("events", &["events"], &["eventos"]),
    RouteDefinition::client_only("events-detail", &["events/:id"], &["eventos/:id"]),
    RouteDefinition::page("music", &["music"], &["musica"]),
    RouteDefinition::client_only("music-detail", &["music/:slug"], &["musica/:slug"]),
    RouteDefinition::page("news", &["news"], &["noticias"]),
    RouteDefinition::client_only("news-detail", &["news/:slug"], &["noticias/:slug"]),
    RouteDefinition::page(
        "zen-tribe",
        &["zentribe", "tribe", "zen-tribe"],
        &["tribo-zen", "tribo"],
    ),
    RouteDefinition::page("press-kit", &["work-with-me"], &["trabalhe-comigo"]),
    RouteDefinition::client_only(
        "shop-product",
        &["shop/product/:slug"],
        &["loja/produto/:slug"],
    ),
    RouteDefinition {
        key: "shop",
        en: &["shop"],
        pt: &["loja"],
        is_index: false,
        has_wildcard: true,
        prerender: true,
    },
    RouteDefinition::client_only("cart", &["cart"], &["carrinho"]),
    RouteDefinition::client_only("checkout", &["checkout"], &["finalizar-compra"]),
    RouteDefinition::client_only("tickets", &["tickets"], &["ingressos"]),
    RouteDefinition::client_only(
        "tickets-checkout",
        &["tickets-checkout"],
        &["finalizar-ingressos"],
    ),
    RouteDefinition::client_only("dashboard", &["dashboard"], &["painel"]),
    RouteDefinition::client_only("my-account", &["my-account"], &["minha-conta"]),
    RouteDefinition::page("faq", &["faq"], &["perguntas-frequentes"]),
    RouteDefinition::page("philosophy", &["my-philosophy"], &["minha-filosofia"]),
    RouteDefinition::page("media", &["media"], &["na-midia"]),
    RouteDefinition::page("support-artist", &["support-the-artist"], &["apoie-o-artista"]),
    RouteDefinition::client_only("privacy-policy", &["privacy-policy"], &["politica-de-privacidade"]),
    RouteDefinition::client_only("return-policy", &["return-policy"], &["reembolso"]),
    RouteDefinition::client_only("terms", &["terms"], &["termos"]),
    RouteDefinition::client_only("code-of-conduct", &["conduct"], &["regras-de-conduta"]),
];

/// An immutable view over a set of route definitions.
///
/// Copyable and cheap to pass around; all lookups borrow from the underlying
/// `'static` definitions.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDefinition],
}

/// A route paired with its canonical full path in both languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    /// The underlying route.
    pub route: &'static RouteDefinition,
    /// Canonical English path (`"/about"`).
    pub en_path: String,
    /// Canonical Portuguese path (`"/pt/sobre"`).
    pub pt_path: String,
}

impl RouteTable {
    /// The production route table.
    #[must_use]
    pub fn builtin() -> Self {
        Self { routes: ROUTES }
    }

    /// A table over custom definitions (primarily for tests).
    #[must_use]
    pub const fn new(routes: &'static [RouteDefinition]) -> Self {
        Self { routes }
    }

    /// All definitions in declaration order.
    #[must_use]
    pub fn routes(&self) -> &'static [RouteDefinition] {
        self.routes
    }

    /// Look up a route by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static RouteDefinition> {
        self.routes.iter().find(|route| route.key == key)
    }

    /// Resolve a URL path to the route it belongs to.
    ///
    /// The path is matched against every segment (canonical and aliases) of
    /// every route for the given language, in declaration order; the first
    /// route whose segment equals the path or sits above it on a `/` boundary
    /// wins. Portuguese paths are accepted with or without their `/pt`
    /// prefix. Returns `None` when nothing matches.
    #[must_use]
    pub fn find_by_path(&self, path: &str, lang: Language) -> Option<&'static RouteDefinition> {
        let relative = match lang {
            Language::Pt => match strip_pt_prefix(path) {
                Some("") => "/",
                Some(rest) => rest,
                None => path,
            },
            Language::En => path,
        };

        self.routes.iter().find(|route| {
            route.localized_paths(lang).iter().any(|segment| {
                if segment.is_empty() {
                    relative == "/"
                } else {
                    let candidate = format!("/{segment}");
                    matches_or_nested(relative, &candidate)
                }
            })
        })
    }

    /// Canonical path pairs for every route, in declaration order.
    pub fn localized_entries(&self) -> impl Iterator<Item = LocalizedEntry> + 'static {
        self.routes.iter().map(|route| LocalizedEntry {
            route,
            en_path: build_full_path(route.canonical_segment(Language::En), Language::En),
            pt_path: build_full_path(route.canonical_segment(Language::Pt), Language::Pt),
        })
    }

    /// Canonical path pairs for the routes that get static snapshots.
    pub fn prerender_entries(&self) -> impl Iterator<Item = LocalizedEntry> + 'static {
        self.localized_entries().filter(|entry| entry.route.prerender)
    }
}

/// Strip a leading `/pt` language prefix.
///
/// Returns the remainder (`""` for `/pt` itself, `"/sobre"` for
/// `/pt/sobre`), or `None` when the path does not carry the prefix. A path
/// like `/ptx` is not prefixed.
pub(crate) fn strip_pt_prefix(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/pt")?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_segments_are_unique_per_language() {
        let table = RouteTable::builtin();
        for lang in [Language::En, Language::Pt] {
            let mut seen = HashSet::new();
            for route in table.routes() {
                for segment in route.localized_paths(lang) {
                    assert!(
                        seen.insert(*segment),
                        "duplicate {lang} segment {segment:?} in route {}",
                        route.key
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_route_has_a_canonical_segment_per_language() {
        for route in RouteTable::builtin().routes() {
            assert!(!route.en.is_empty(), "route {} has no en segments", route.key);
            assert!(!route.pt.is_empty(), "route {} has no pt segments", route.key);
        }
    }

    #[test]
    fn test_only_home_is_index() {
        let index_keys: Vec<_> = RouteTable::builtin()
            .routes()
            .iter()
            .filter(|route| route.is_index)
            .map(|route| route.key)
            .collect();
        assert_eq!(index_keys, vec!["home"]);
    }

    #[test]
    fn test_get_by_key() {
        let table = RouteTable::builtin();
        assert!(table.get("shop").unwrap().has_wildcard);
        assert_eq!(table.get("unknown"), None);
    }

    #[test]
    fn test_find_home() {
        let table = RouteTable::builtin();
        assert_eq!(table.find_by_path("/", Language::En).unwrap().key, "home");
        assert_eq!(table.find_by_path("/", Language::Pt).unwrap().key, "home");
        assert_eq!(table.find_by_path("/pt", Language::Pt).unwrap().key, "home");
    }

    #[test]
    fn test_find_regular_route() {
        let table = RouteTable::builtin();
        assert_eq!(table.find_by_path("/about", Language::En).unwrap().key, "about");
        assert_eq!(table.find_by_path("/sobre", Language::Pt).unwrap().key, "about");
        assert_eq!(
            table.find_by_path("/pt/sobre", Language::Pt).unwrap().key,
            "about"
        );
    }

    #[test]
    fn test_find_resolves_aliases_to_one_route() {
        let table = RouteTable::builtin();
        let via_alias = table.find_by_path("/zen-tribe", Language::En).unwrap();
        let via_canonical = table.find_by_path("/zentribe", Language::En).unwrap();
        let via_pt = table.find_by_path("/tribo-zen", Language::Pt).unwrap();
        assert_eq!(via_alias.key, "zen-tribe");
        assert_eq!(via_alias, via_canonical);
        assert_eq!(via_alias, via_pt);
    }

    #[test]
    fn test_find_matches_nested_paths() {
        let table = RouteTable::builtin();
        assert_eq!(
            table.find_by_path("/shop/product/zen-mug", Language::En).unwrap().key,
            "shop"
        );
        assert_eq!(
            table.find_by_path("/events/123", Language::En).unwrap().key,
            "events"
        );
    }

    #[test]
    fn test_find_first_match_wins_in_declaration_order() {
        // "/events" is declared before "/events/:id"; a nested path below
        // "/events" resolves to the listing, never the detail definition.
        let table = RouteTable::builtin();
        assert_eq!(
            table.find_by_path("/events/42/tickets", Language::En).unwrap().key,
            "events"
        );
    }

    #[test]
    fn test_find_unknown_path() {
        let table = RouteTable::builtin();
        assert_eq!(table.find_by_path("/totally-unknown", Language::En), None);
        assert_eq!(table.find_by_path("/shopping", Language::En), None);
    }

    #[test]
    fn test_prerender_entries_cover_the_critical_pages() {
        let table = RouteTable::builtin();
        let keys: Vec<_> = table.prerender_entries().map(|e| e.route.key).collect();
        assert_eq!(
            keys,
            vec![
                "home",
                "about",
                "events",
                "music",
                "news",
                "zen-tribe",
                "press-kit",
                "shop",
                "faq",
                "philosophy",
                "media",
                "support-artist",
            ]
        );
    }

    #[test]
    fn test_localized_entries_use_canonical_segments() {
        let table = RouteTable::builtin();
        let tribe = table
            .localized_entries()
            .find(|entry| entry.route.key == "zen-tribe")
            .unwrap();
        assert_eq!(tribe.en_path, "/zentribe");
        assert_eq!(tribe.pt_path, "/pt/tribo-zen");
    }

    #[test]
    fn test_strip_pt_prefix() {
        assert_eq!(strip_pt_prefix("/pt"), Some(""));
        assert_eq!(strip_pt_prefix("/pt/sobre"), Some("/sobre"));
        assert_eq!(strip_pt_prefix("/ptx"), None);
        assert_eq!(strip_pt_prefix("/about"), None);
    }
}
