//! CLI command implementations.

mod prerender;
mod serve;
mod sitemap;

pub(crate) use prerender::PrerenderArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use sitemap::SitemapArgs;
