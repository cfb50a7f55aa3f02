//! # seo-pages
//!
//! A build-time generator for programmatic search-landing pages. A small
//! dimension catalog (scenarios, recipients, styles, industries) is expanded
//! into thousands of static pages, one per combination, each cross-linked to
//! its closest siblings and listed in a sitemap set.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! 1. Load       dimensions.json + config.toml  →  Catalog, SiteConfig
//! 2. Enumerate  Catalog                        →  PageSet      (barrier)
//! 3. Render     PageSet + related links        →  PageArtifact (parallel)
//! 4. Write      PageArtifact                   →  public/p/<slug>/index.html
//! 5. Sitemaps   page URLs                      →  public/sitemap*.xml
//! ```
//!
//! Every run regenerates the full corpus. Writes overwrite in place, so
//! running twice with the same inputs on the same day yields the same tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Dimension catalog: JSON loading, localized names, validation |
//! | [`slug`] | URL-safe token derivation shared by every stage |
//! | [`enumerate`] | Family A/B cross products collected into a slug-keyed, insertion-ordered [`enumerate::PageSet`] |
//! | [`related`] | Bounded style- and scenario-varied sibling selection with a [`related::LinkPolicy`] |
//! | [`render`] | Pure `PageIdentity → PageArtifact` rendering using Maud |
//! | [`sitemap`] | Programmatic sitemap, main sitemap and sitemap index |
//! | [`sink`] | Two-operation output trait with a filesystem implementation |
//! | [`generate`] | Pipeline orchestration and progress events |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## First Slug Wins
//!
//! Recipient and industry ids share one namespace in page slugs, so
//! `late-student-funny` can come from either family. Family A (recipients) is
//! enumerated first and keeps the slug; the industry tuple is dropped and
//! counted. The page set makes that rule explicit instead of leaving it to the
//! order of a search loop.
//!
//! ## Verified Related Links
//!
//! By default a related link is only emitted when its slug belongs to the
//! final page set, and the link describes the page that actually owns the
//! slug. `related.policy = "unchecked"` emits the first candidates as built.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Page copy is bound into a typed record first, so the two copy
//! variants are plain Rust and every interpolation is auto-escaped.

pub mod catalog;
pub mod config;
pub mod enumerate;
pub mod generate;
pub mod output;
pub mod related;
pub mod render;
pub mod sink;
pub mod sitemap;
pub mod slug;

#[cfg(test)]
pub(crate) mod test_helpers;
