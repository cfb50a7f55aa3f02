//! Shared test utilities for the seo-pages test suite.
//!
//! Provides catalog builders, the shipped fixture catalog, and lookup
//! helpers that work with enumeration output (`PageSet`, `PageIdentity`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = catalog(
//!     &[("late", "Late")],
//!     &[("boss", "Boss")],
//!     &[("funny", "Funny")],
//!     &[],
//! );
//! let pages = enumerate(&catalog);
//! assert_eq!(page_slugs(&pages), vec!["late-boss-funny"]);
//! ```

use std::path::Path;

use crate::catalog::{Catalog, DimensionItem, load_catalog};
use crate::config::SiteConfig;
use crate::enumerate::{PageIdentity, PageSet};

// =========================================================================
// Catalog builders
// =========================================================================

/// A default-locale item without keywords.
pub fn item(id: &str, name: &str) -> DimensionItem {
    DimensionItem::new(id, name)
}

fn items(pairs: &[(&str, &str)]) -> Vec<DimensionItem> {
    pairs.iter().map(|(id, name)| item(id, name)).collect()
}

/// Build a catalog from `(id, name)` pairs. All four dimensions are present;
/// set `recipients`/`industries` to `None` afterwards to model an absent one.
pub fn catalog(
    scenarios: &[(&str, &str)],
    recipients: &[(&str, &str)],
    styles: &[(&str, &str)],
    industries: &[(&str, &str)],
) -> Catalog {
    Catalog {
        scenarios: items(scenarios),
        styles: items(styles),
        recipients: Some(items(recipients)),
        industries: Some(items(industries)),
    }
}

/// One scenario with keywords, one recipient, two styles, no industries.
pub fn skip_work_catalog() -> Catalog {
    let mut catalog = catalog(
        &[("skip_work", "Skip Work")],
        &[("boss", "Boss")],
        &[("sincere", "Sincere"), ("creative", "Creative")],
        &[],
    );
    catalog.scenarios[0].keywords = vec!["sick".to_string(), "tired".to_string()];
    catalog
}

/// A catalog with recipient/industry id collisions across both families.
pub fn colliding_catalog() -> Catalog {
    catalog(
        &[("late", "Late"), ("skip_work", "Skip Work"), ("cancel", "Cancel Plans")],
        &[("boss", "Boss"), ("student", "Student"), ("friend", "Friend")],
        &[("funny", "Funny"), ("sincere", "Sincere"), ("dramatic", "Dramatic")],
        &[("student", "Student Life"), ("tech", "Tech"), ("friend", "Friendship")],
    )
}

/// The catalog shipped in `fixtures/dimensions.json`.
pub fn fixture_catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/dimensions.json");
    load_catalog(&path).unwrap()
}

/// Stock config pointed at a stable test host.
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site.base_url = "https://example.com".to_string();
    config.site.name = "Test Generator".to_string();
    config
}

// =========================================================================
// Page set lookups: panic with a clear message on miss
// =========================================================================

/// All slugs in enumeration order.
pub fn page_slugs<'s>(pages: &'s PageSet<'_>) -> Vec<&'s str> {
    pages.slugs().collect()
}

/// Find a page by slug. Panics if not found.
pub fn find_page<'s, 'a>(pages: &'s PageSet<'a>, slug: &str) -> &'s PageIdentity<'a> {
    pages.get(slug).unwrap_or_else(|| {
        let slugs = page_slugs(pages);
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}
