//! The page generation pipeline.
//!
//! One run regenerates the whole corpus:
//!
//! ```text
//! catalog ─▶ enumerate ─▶ ┬─ resolve related ─▶ render ─▶ write (per chunk)
//!                (barrier) └─ page URLs ─────────────────▶ sitemaps
//! ```
//!
//! Enumeration and deduplication finish before any related link is resolved,
//! because the resolver checks candidates against the final page set.
//!
//! Pages are processed in chunks of `output.progress_interval` identities.
//! Within a chunk, related links are resolved and pages rendered in parallel
//! with [rayon](https://docs.rs/rayon); the rendered chunk is then written
//! sequentially in enumeration order. Only one chunk of HTML is held in
//! memory at a time.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── p/
//! │   ├── skip-work-boss-sincere/
//! │   │   └── index.html
//! │   └── ...
//! ├── sitemap-programmatic.xml
//! ├── sitemap-main.xml
//! └── sitemap.xml
//! ```
//!
//! The first failed directory creation or write aborts the run. Files written
//! before the failure stay on disk.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::enumerate::{ContextKind, PageIdentity, enumerate};
use crate::related::RelatedResolver;
use crate::render::{PageArtifact, Renderer};
use crate::sink::{FsSink, OutputSink};
use crate::sitemap;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// File written inside each page directory.
pub const PAGE_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress reported while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    /// Enumeration finished.
    Enumerated {
        total: usize,
        recipient_pages: usize,
        industry_pages: usize,
        duplicates: usize,
    },
    /// Emitted every `output.progress_interval` written pages.
    Progress { written: usize, total: usize },
    /// All three sitemap documents written.
    SitemapsWritten { entries: usize },
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages_written: usize,
    pub recipient_pages: usize,
    pub industry_pages: usize,
    /// Candidates dropped because their slug was already taken.
    pub duplicates: usize,
    pub related_links: usize,
    pub sitemap_entries: usize,
}

/// Run the full pipeline, writing under `output_dir`.
pub fn generate(
    catalog: &Catalog,
    config: &SiteConfig,
    output_dir: &Path,
    today: NaiveDate,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateReport, GenerateError> {
    let sink = FsSink::new(output_dir);
    create_dir(&sink, Path::new(""))?;
    generate_with_sink(&sink, catalog, config, today, events)
}

/// Run the full pipeline against any sink (allows testing with mock).
pub fn generate_with_sink(
    sink: &impl OutputSink,
    catalog: &Catalog,
    config: &SiteConfig,
    today: NaiveDate,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateReport, GenerateError> {
    let pages = enumerate(catalog);
    let total = pages.len();
    let mut report = GenerateReport {
        recipient_pages: pages.count(ContextKind::Recipient),
        industry_pages: pages.count(ContextKind::Industry),
        duplicates: pages.duplicates(),
        ..Default::default()
    };
    emit(
        &events,
        GenerateEvent::Enumerated {
            total,
            recipient_pages: report.recipient_pages,
            industry_pages: report.industry_pages,
            duplicates: report.duplicates,
        },
    );

    let resolver = RelatedResolver::new(catalog, &pages, config.related.policy);
    let renderer = Renderer::new(config);
    let pages_dir = Path::new(&config.output.pages_dir);
    let interval = config.output.progress_interval.max(1);

    create_dir(sink, pages_dir)?;

    let ordered: Vec<&PageIdentity<'_>> = pages.iter().collect();
    let mut page_urls = Vec::with_capacity(total);
    for chunk in ordered.chunks(interval) {
        let artifacts: Vec<PageArtifact> = chunk
            .par_iter()
            .map(|page| {
                let related = resolver.resolve(page);
                renderer.render(page, &related)
            })
            .collect();

        for artifact in artifacts {
            let dir = pages_dir.join(&artifact.slug);
            create_dir(sink, &dir)?;
            write_file(sink, &dir.join(PAGE_FILE), artifact.html.as_bytes())?;

            report.pages_written += 1;
            report.related_links += artifact.related.len();
            page_urls.push(artifact.canonical_url);

            if report.pages_written % interval == 0 {
                emit(
                    &events,
                    GenerateEvent::Progress {
                        written: report.pages_written,
                        total,
                    },
                );
            }
        }
    }

    let sitemaps = sitemap::assemble(&page_urls, &config.site, today);
    for (name, content) in sitemaps.documents() {
        write_file(sink, Path::new(name), content.as_bytes())?;
    }
    report.sitemap_entries = sitemaps.page_entries;
    emit(
        &events,
        GenerateEvent::SitemapsWritten {
            entries: sitemaps.page_entries,
        },
    );

    Ok(report)
}

fn emit(events: &Option<Sender<GenerateEvent>>, event: GenerateEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening.
        tx.send(event).ok();
    }
}

fn create_dir(sink: &impl OutputSink, path: &Path) -> Result<(), GenerateError> {
    sink.create_dir_all(path)
        .map_err(|source| GenerateError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

fn write_file(sink: &impl OutputSink, path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    sink.write_file(path, contents)
        .map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })
}
