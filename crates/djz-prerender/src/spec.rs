//! Route specs consumed by the driver.

use djz_routes::RouteTable;

/// Selectors that must render before a page counts as ready.
pub const DEFAULT_WAIT_FOR: &str = "h1, footer";

/// Minimum expected snapshot size for the home pages.
pub const HOME_MIN_BYTES: usize = 4000;

/// Minimum expected snapshot size for every other page.
pub const PAGE_MIN_BYTES: usize = 3000;

/// One route to snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Full URL path, language prefix included (`"/pt/sobre"`).
    pub path: String,
    /// Snapshots smaller than this produce a warning.
    pub min_bytes: usize,
    /// Comma-separated list of selectors to wait for.
    pub wait_for: String,
}

/// Build the snapshot list from a route table.
///
/// Every prerendered route contributes its canonical English and Portuguese
/// paths, in table order, English first. Home pages get the larger size
/// floor since they render more sections.
#[must_use]
pub fn route_specs(table: &RouteTable) -> Vec<RouteSpec> {
    let mut specs = Vec::new();
    for entry in table.prerender_entries() {
        let min_bytes = if entry.route.is_index {
            HOME_MIN_BYTES
        } else {
            PAGE_MIN_BYTES
        };
        for path in [entry.en_path, entry.pt_path] {
            specs.push(RouteSpec {
                path,
                min_bytes,
                wait_for: DEFAULT_WAIT_FOR.to_owned(),
            });
        }
    }
    specs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_two_paths_per_prerendered_route() {
        let table = RouteTable::builtin();
        let specs = route_specs(&table);
        assert_eq!(specs.len(), table.prerender_entries().count() * 2);
    }

    #[test]
    fn test_home_pages_come_first_with_larger_floor() {
        let specs = route_specs(&RouteTable::builtin());
        assert_eq!(specs[0].path, "/");
        assert_eq!(specs[0].min_bytes, HOME_MIN_BYTES);
        assert_eq!(specs[1].path, "/pt");
        assert_eq!(specs[1].min_bytes, HOME_MIN_BYTES);
        assert_eq!(specs[2].path, "/about");
        assert_eq!(specs[2].min_bytes, PAGE_MIN_BYTES);
        assert_eq!(specs[3].path, "/pt/sobre");
    }

    #[test]
    fn test_canonical_segments_only() {
        let specs = route_specs(&RouteTable::builtin());
        let paths: Vec<_> = specs.iter().map(|s| s.path.as_str()).collect();
        assert!(paths.contains(&"/zentribe"));
        assert!(paths.contains(&"/pt/tribo-zen"));
        assert!(!paths.contains(&"/tribe"));
        assert!(!paths.contains(&"/zen-tribe"));
    }

    #[test]
    fn test_every_spec_waits_for_the_critical_selectors() {
        for spec in route_specs(&RouteTable::builtin()) {
            assert_eq!(spec.wait_for, DEFAULT_WAIT_FOR);
        }
    }
}
