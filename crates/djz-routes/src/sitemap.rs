//! Sitemap XML generation.
//!
//! Renders a `sitemap-pages.xml` urlset with hreflang alternates for every
//! snapshotted page, plus the `sitemap.xml` index that references it. Pure
//! string construction; callers decide where the files land.

use std::fmt::Write;

use crate::table::RouteTable;

/// Render the pages urlset.
///
/// One `<url>` entry per prerendered route, with `xhtml:link` alternates for
/// both languages. `base_url` must not end with a slash; `lastmod` is an
/// RFC 3339 timestamp.
#[must_use]
pub fn pages_sitemap(table: &RouteTable, base_url: &str, lastmod: &str) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#,
    );

    for entry in table.prerender_entries() {
        let en_url = format!("{base_url}{}", entry.en_path);
        let pt_url = if entry.route.is_index {
            format!("{base_url}/pt/")
        } else {
            format!("{base_url}{}", entry.pt_path)
        };
        let priority = if entry.route.is_index { "1.0" } else { "0.8" };

        write!(
            xml,
            r#"
  <url>
    <loc>{en_url}</loc>
    <lastmod>{lastmod}</lastmod>
    <changefreq>weekly</changefreq>
    <priority>{priority}</priority>
    <xhtml:link rel="alternate" hreflang="en" href="{en_url}" />
    <xhtml:link rel="alternate" hreflang="pt" href="{pt_url}" />
  </url>"#
        )
        .unwrap();
    }

    xml.push_str("\n</urlset>\n");
    xml
}

/// Render the sitemap index referencing the pages urlset.
#[must_use]
pub fn sitemap_index(base_url: &str, lastmod: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap>
    <loc>{base_url}/sitemap-pages.xml</loc>
    <lastmod>{lastmod}</lastmod>
  </sitemap>
</sitemapindex>
"#
    )
}
