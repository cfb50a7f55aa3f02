//! Sitemap assembly.
//!
//! Every run produces three documents at the public root:
//!
//! ```text
//! sitemap-programmatic.xml   one <url> per page, monthly, priority 0.6
//! sitemap-main.xml           the tool root only, weekly, priority 1.0
//! sitemap.xml                index referencing the two above
//! ```
//!
//! Assembly is pure. The modification date is passed in so two runs on the
//! same day with the same catalog produce identical bytes.

use crate::config::SiteSection;
use chrono::NaiveDate;

pub const PROGRAMMATIC_SITEMAP: &str = "sitemap-programmatic.xml";
pub const MAIN_SITEMAP: &str = "sitemap-main.xml";
pub const SITEMAP_INDEX: &str = "sitemap.xml";

const PAGE_PRIORITY: f32 = 0.6;
const ROOT_PRIORITY: f32 = 1.0;
const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    /// 0.0 to 1.0, written with one decimal.
    pub priority: f32,
}

impl SitemapEntry {
    /// Entry for a generated landing page.
    pub fn page(loc: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            loc: loc.into(),
            lastmod: today,
            changefreq: ChangeFreq::Monthly,
            priority: PAGE_PRIORITY,
        }
    }

    /// Entry for the tool root.
    pub fn root(loc: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            loc: loc.into(),
            lastmod: today,
            changefreq: ChangeFreq::Weekly,
            priority: ROOT_PRIORITY,
        }
    }
}

/// The three sitemap documents of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSet {
    pub programmatic: String,
    pub main: String,
    pub index: String,
    /// Number of `<url>` entries in the programmatic sitemap.
    pub page_entries: usize,
}

impl SitemapSet {
    /// `(file name, content)` pairs in write order.
    pub fn documents(&self) -> [(&'static str, &str); 3] {
        [
            (PROGRAMMATIC_SITEMAP, self.programmatic.as_str()),
            (MAIN_SITEMAP, self.main.as_str()),
            (SITEMAP_INDEX, self.index.as_str()),
        ]
    }
}

/// Build all three documents from the canonical page URLs, in the given order.
pub fn assemble<S: AsRef<str>>(
    page_urls: &[S],
    site: &SiteSection,
    today: NaiveDate,
) -> SitemapSet {
    let root = site.root_url();

    let pages: Vec<SitemapEntry> = page_urls
        .iter()
        .map(|url| SitemapEntry::page(url.as_ref(), today))
        .collect();
    let programmatic = render_urlset(&pages);
    let main = render_urlset(&[SitemapEntry::root(root, today)]);

    let sitemaps: Vec<String> = [MAIN_SITEMAP, PROGRAMMATIC_SITEMAP]
        .iter()
        .map(|file| format!("{root}/{file}"))
        .collect();
    let index = render_index(&sitemaps, today);

    SitemapSet {
        programmatic,
        main,
        index,
        page_entries: pages.len(),
    }
}

/// Render a `<urlset>` document.
pub fn render_urlset(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{XMLNS}\">\n"));
    for entry in entries {
        xml.push_str(&url_to_xml(entry));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn url_to_xml(entry: &SitemapEntry) -> String {
    let mut xml = String::from("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
    xml.push_str(&format!(
        "    <lastmod>{}</lastmod>\n",
        entry.lastmod.format("%Y-%m-%d")
    ));
    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        entry.changefreq.as_str()
    ));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
    xml.push_str("  </url>\n");
    xml
}

/// Render a `<sitemapindex>` document over absolute sitemap URLs.
pub fn render_index<S: AsRef<str>>(sitemap_urls: &[S], today: NaiveDate) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<sitemapindex xmlns=\"{XMLNS}\">\n"));

    let lastmod = today.format("%Y-%m-%d");
    for url in sitemap_urls {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url.as_ref())));
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
