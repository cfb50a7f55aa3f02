//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Catalog
//! Scenarios (2)
//!     001 Skip Work (skip_work)
//!         Keywords: sick, tired
//!     002 Running Late (late)
//! Recipients (1)
//!     001 Boss (boss)
//! Styles (2)
//!     001 Sincere (sincere)
//!     002 Creative (creative)
//! Industries: absent
//!
//! Pages
//!     Recipient pages: 4
//!     Industry pages: 0
//!     Duplicates skipped: 0
//!     Total: 4
//!     First: https://excuse.demo.densematrix.ai/p/skip-work-boss-sincere/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Enumerated 2400 pages (1800 recipient, 600 industry, 600 duplicates skipped)
//!     Generated 1000/2400 pages
//!     Generated 2000/2400 pages
//! Sitemaps (2400 page entries)
//!     sitemap-programmatic.xml
//!     sitemap-main.xml
//!     sitemap.xml
//! Generated 2400 pages, 9600 related links → public
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::catalog::{Catalog, Dimension, DimensionItem};
use crate::config::SiteConfig;
use crate::enumerate::{ContextKind, PageSet};
use crate::generate::{GenerateEvent, GenerateReport};
use crate::sitemap;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Section title for a dimension ("Scenarios", "Recipients", ...).
fn dimension_title(dimension: Dimension) -> String {
    let key = dimension.key();
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format an item line: positional index, display name, raw id.
///
/// ```text
/// 001 Skip Work (skip_work)
/// ```
fn item_line(index: usize, item: &DimensionItem, locale: &str) -> String {
    format!("{} {} ({})", format_index(index), item.name(locale), item.id)
}

// ============================================================================
// Check output
// ============================================================================

/// Format the catalog inventory and corpus summary for `check`.
pub fn format_check_output(
    catalog: &Catalog,
    pages: &PageSet<'_>,
    config: &SiteConfig,
) -> Vec<String> {
    let locale = config.site.locale.as_str();
    let mut lines = vec!["Catalog".to_string()];

    for dimension in [
        Dimension::Scenario,
        Dimension::Recipient,
        Dimension::Style,
        Dimension::Industry,
    ] {
        let title = dimension_title(dimension);
        let Some(items) = catalog.items(dimension) else {
            lines.push(format!("{}: absent", title));
            continue;
        };
        lines.push(format!("{} ({})", title, items.len()));
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), item_line(i + 1, item, locale)));
            if !item.keywords.is_empty() {
                lines.push(format!(
                    "{}Keywords: {}",
                    indent(2),
                    item.keywords.join(", ")
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    lines.push(format!(
        "{}Recipient pages: {}",
        indent(1),
        pages.count(ContextKind::Recipient)
    ));
    lines.push(format!(
        "{}Industry pages: {}",
        indent(1),
        pages.count(ContextKind::Industry)
    ));
    lines.push(format!("{}Duplicates skipped: {}", indent(1), pages.duplicates()));
    lines.push(format!("{}Total: {}", indent(1), pages.len()));
    if let Some(first) = pages.iter().next() {
        lines.push(format!(
            "{}First: {}/{}/{}/",
            indent(1),
            config.site.root_url(),
            config.output.pages_dir,
            first.slug()
        ));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(catalog: &Catalog, pages: &PageSet<'_>, config: &SiteConfig) {
    for line in format_check_output(catalog, pages, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format a single pipeline progress event as display lines.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::Enumerated {
            total,
            recipient_pages,
            industry_pages,
            duplicates,
        } => vec![format!(
            "Enumerated {} pages ({} recipient, {} industry, {} duplicates skipped)",
            total, recipient_pages, industry_pages, duplicates
        )],
        GenerateEvent::Progress { written, total } => {
            vec![format!("{}Generated {}/{} pages", indent(1), written, total)]
        }
        GenerateEvent::SitemapsWritten { entries } => {
            let mut lines = vec![format!("Sitemaps ({} page entries)", entries)];
            for file in [
                sitemap::PROGRAMMATIC_SITEMAP,
                sitemap::MAIN_SITEMAP,
                sitemap::SITEMAP_INDEX,
            ] {
                lines.push(format!("{}{}", indent(1), file));
            }
            lines
        }
    }
}

/// Format the closing summary of a generate run.
pub fn format_report(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    vec![format!(
        "Generated {} pages, {} related links \u{2192} {}",
        report.pages_written,
        report.related_links,
        output_dir.display()
    )]
}

/// Print the closing summary to stdout.
pub fn print_report(report: &GenerateReport, output_dir: &Path) {
    for line in format_report(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
