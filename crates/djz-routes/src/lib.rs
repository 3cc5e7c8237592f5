//! Bilingual route table and localization resolver.
//!
//! The site publishes English pages at the URL root (`/about`) and Portuguese
//! pages under a `/pt` prefix (`/pt/sobre`). This crate owns the mapping from
//! logical pages to language-specific URL segments and provides pure lookups
//! over it:
//!
//! - [`Language::normalize`] folds arbitrary language tags onto the two
//!   supported codes
//! - [`build_full_path`] builds a canonical URL path from a segment
//! - [`RouteTable::find_by_path`] resolves an incoming URL path to its route
//! - [`RouteTable::alternate_links`] computes hreflang alternates for SEO tags
//! - [`sitemap`] renders sitemap XML from the same table
//!
//! # Totality
//!
//! Every operation here is pure and total. Unresolvable input degrades to a
//! safe default (English, identity path echo) instead of failing, so a wrong
//! alternate link can never take a page down. The crate defines no error type.
//!
//! # Ownership
//!
//! The table is an immutable value built once and passed by reference.
//! [`RouteTable::builtin`] returns the production table; tests construct
//! their own tables from custom definitions.

mod alternates;
mod definition;
mod language;
mod paths;
pub mod sitemap;
mod table;

pub use alternates::AlternateLinks;
pub use definition::RouteDefinition;
pub use language::Language;
pub use paths::build_full_path;
pub use table::{LocalizedEntry, RouteTable};
