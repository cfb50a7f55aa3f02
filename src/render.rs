//! Landing page rendering.
//!
//! Rendering is split in two steps:
//!
//! 1. [`PageBindings::bind`] resolves every piece of copy for one page
//!    identity into a typed record: title, description, heading, keywords,
//!    canonical URL, call-to-action URL and the body sentences. The copy
//!    variant is picked by the identity's [`ContextKind`].
//! 2. A fixed maud layout turns the record, the related links and the
//!    structured-data block into the final document.
//!
//! [`Renderer::render`] is pure. It reads nothing but its arguments and the
//! configuration captured at construction, so rendering the same identity
//! twice yields byte-identical artifacts and pages can be rendered on any
//! number of threads.
//!
//! ## Head
//!
//! - `<title>`, description, keywords and canonical link
//! - Open Graph and Twitter card metadata
//! - A schema.org `WebApplication` JSON-LD block whose `name`, `description`
//!   and `url` repeat the page title, description and canonical URL
//! - The gtag snippet, only when `site.analytics_id` is set
//! - An inline stylesheet: palette variables from `[colors]` followed by
//!   `static/page.css`
//!
//! All interpolated text goes through maud's escaping. The JSON-LD block is
//! inserted raw, so `</` inside it is rewritten to `<\/` to keep catalog text
//! from closing the script element.

use crate::config::{self, SiteConfig, SiteSection};
use crate::enumerate::{ContextKind, PageIdentity};
use crate::related::{RelatedAxis, RelatedPage};
use crate::slug::slugify;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;

const CSS_STATIC: &str = include_str!("../static/page.css");

/// Scenario keywords used in the body copy.
const BODY_KEYWORDS: usize = 3;

/// A fully rendered landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageArtifact {
    pub slug: String,
    pub context_kind: ContextKind,
    pub title: String,
    pub description: String,
    pub heading: String,
    pub canonical_url: String,
    pub keywords: String,
    pub cta_url: String,
    pub related: Vec<RelatedLink>,
    pub structured_data: serde_json::Value,
    pub html: String,
}

/// An internal cross-link as embedded in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLink {
    pub slug: String,
    pub url: String,
    pub label: String,
    pub axis: RelatedAxis,
}

/// Every piece of copy for one page, resolved from an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBindings {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub heading: String,
    pub canonical_url: String,
    pub keywords: String,
    pub cta_url: String,
    pub cta_label: String,
    /// Lower-cased style name, emphasized in the intro.
    pub style_lower: String,
    /// Lower-cased scenario name, emphasized in the intro.
    pub scenario_lower: String,
    /// Intro sentence after the emphasized names.
    pub intro: String,
    pub why_heading: String,
    pub why: String,
    pub steps: Vec<String>,
    pub related_heading: String,
}

impl PageBindings {
    pub fn bind(identity: &PageIdentity<'_>, site: &SiteSection, canonical_url: String) -> Self {
        let locale = site.locale.as_str();
        let scenario = identity.scenario.name(locale);
        let context = identity.context.name(locale);
        let style = identity.style.name(locale);

        let noun = site.noun.as_str();
        let nouns = site.noun_plural.as_str();
        let noun_lower = noun.to_lowercase();
        let nouns_lower = nouns.to_lowercase();
        let scenario_lower = scenario.to_lowercase();
        let context_lower = context.to_lowercase();
        let style_lower = style.to_lowercase();

        let (title, description, heading, audience, nuance) = match identity.context_kind {
            ContextKind::Recipient => (
                format!("{style} {noun} for {scenario} to Your {context} | {}", site.name),
                format!(
                    "Need a {style_lower} {noun_lower} for {scenario_lower}? Our AI generates \
                     perfect {nouns_lower} for telling your {context_lower}. Try free!"
                ),
                format!("{style} {nouns} for {scenario} ({context})"),
                format!("customized {nouns_lower} for telling your {context_lower}"),
                format!("communicating with your {context_lower}"),
            ),
            ContextKind::Industry => (
                format!("{style} {scenario} {noun} for {context} | {}", site.name),
                format!(
                    "Generate {style_lower} {nouns_lower} for {scenario_lower} in the \
                     {context_lower}. AI-powered {noun_lower} generator. Try free!"
                ),
                format!("{style} {scenario} {nouns} for {context}"),
                format!("industry-specific {nouns_lower} perfect for {context_lower} professionals"),
                format!("the {context_lower}"),
            ),
        };

        let situations = if identity.scenario.keywords.is_empty() {
            scenario_lower.clone()
        } else {
            identity
                .scenario
                .keywords
                .iter()
                .take(BODY_KEYWORDS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            lang: site.locale.clone(),
            title,
            description,
            heading,
            keywords: keywords_line(identity, site),
            cta_url: cta_url(identity, site),
            cta_label: format!("Generate Your {style} {noun} Now →"),
            intro: format!("Our AI-powered {noun_lower} generator creates {audience}."),
            why_heading: format!("Why Use Our {style} {noun} Generator?"),
            why: format!(
                "Sometimes life happens and you need a good {noun_lower}. Whether it's \
                 {situations}, our AI understands the nuances of {nuance} and generates \
                 {style_lower} {nouns_lower} that actually work."
            ),
            steps: vec![
                format!("Select your situation ({scenario})"),
                format!("Choose your tone ({style})"),
                format!("Get an AI-generated {noun_lower} instantly"),
                "Copy and use!".to_string(),
            ],
            related_heading: format!("Related {nouns}"),
            style_lower,
            scenario_lower,
            canonical_url,
        }
    }
}

/// Scenario keywords, then `"<style> <noun>"` and `"<context> <noun>"`,
/// lower-cased, first occurrence kept.
fn keywords_line(identity: &PageIdentity<'_>, site: &SiteSection) -> String {
    let locale = site.locale.as_str();
    let noun = site.noun.to_lowercase();
    let extra = [
        format!("{} {noun}", identity.style.name(locale).to_lowercase()),
        format!("{} {noun}", identity.context.name(locale).to_lowercase()),
    ];

    let mut keywords: Vec<String> = Vec::new();
    for keyword in identity.scenario.keywords.iter().cloned().chain(extra) {
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords.join(", ")
}

/// Deep link into the tool with the page's raw catalog ids preselected.
fn cta_url(identity: &PageIdentity<'_>, site: &SiteSection) -> String {
    format!(
        "{}?scenario={}&style={}&{}={}",
        site.root_url(),
        identity.scenario.id,
        identity.style.id,
        identity.context_kind.dimension().param(),
        identity.context.id,
    )
}

/// Renders page identities with a fixed site configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    site: SiteSection,
    pages_dir: String,
    css: String,
}

impl Renderer {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            site: config.site.clone(),
            pages_dir: config.output.pages_dir.clone(),
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
        }
    }

    /// `<base_url>/<pages_dir>/<slug>/`
    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/{}/{}/", self.site.root_url(), self.pages_dir, slug)
    }

    pub fn render(&self, identity: &PageIdentity<'_>, related: &[RelatedPage<'_>]) -> PageArtifact {
        let bindings = PageBindings::bind(identity, &self.site, self.page_url(identity.slug()));
        let related: Vec<RelatedLink> = related.iter().map(|r| self.related_link(r)).collect();
        let structured_data = self.structured_data(&bindings);
        let html = self.layout(&bindings, &related, &structured_data).into_string();

        PageArtifact {
            slug: identity.slug().to_string(),
            context_kind: identity.context_kind,
            title: bindings.title,
            description: bindings.description,
            heading: bindings.heading,
            canonical_url: bindings.canonical_url,
            keywords: bindings.keywords,
            cta_url: bindings.cta_url,
            related,
            structured_data,
            html,
        }
    }

    fn related_link(&self, related: &RelatedPage<'_>) -> RelatedLink {
        let locale = self.site.locale.as_str();
        let identity = &related.identity;
        RelatedLink {
            slug: identity.slug().to_string(),
            url: self.page_url(identity.slug()),
            label: format!(
                "{} {} {}",
                identity.style.name(locale),
                identity.scenario.name(locale),
                self.site.noun
            ),
            axis: related.axis,
        }
    }

    fn structured_data(&self, bindings: &PageBindings) -> serde_json::Value {
        json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": bindings.title,
            "description": bindings.description,
            "url": bindings.canonical_url,
            "inLanguage": bindings.lang,
            "applicationCategory": "UtilityApplication",
            "operatingSystem": "Web",
            "offers": {
                "@type": "Offer",
                "price": "0",
                "priceCurrency": "USD"
            },
            "author": {
                "@type": "Organization",
                "name": self.site.organization,
                "url": self.site.organization_url
            }
        })
    }

    fn og_image(&self) -> String {
        let image = &self.site.og_image;
        if image.starts_with("http://") || image.starts_with("https://") {
            image.clone()
        } else {
            format!("{}/{}", self.site.root_url(), image.trim_start_matches('/'))
        }
    }

    fn layout(
        &self,
        bindings: &PageBindings,
        related: &[RelatedLink],
        structured_data: &serde_json::Value,
    ) -> Markup {
        let head = html! {
            meta name="description" content=(bindings.description);
            meta name="keywords" content=(bindings.keywords);
            link rel="canonical" href=(bindings.canonical_url);
            meta property="og:title" content=(bindings.title);
            meta property="og:description" content=(bindings.description);
            meta property="og:url" content=(bindings.canonical_url);
            meta property="og:type" content="website";
            meta property="og:image" content=(self.og_image());
            meta property="og:site_name" content=(self.site.name);
            meta name="twitter:card" content="summary_large_image";
            meta name="twitter:title" content=(bindings.title);
            meta name="twitter:description" content=(bindings.description);
            script type="application/ld+json" {
                (PreEscaped(json_ld(structured_data)))
            }
            @if let Some(id) = &self.site.analytics_id {
                (analytics_snippet(id, &slugify(&self.site.name)))
            }
        };

        let content = html! {
            h1 { (bindings.heading) }
            p {
                "Looking for the perfect " strong { (bindings.style_lower) }
                " " (self.site.noun.to_lowercase()) " for "
                strong { (bindings.scenario_lower) } "? "
                (bindings.intro)
            }
            h2 { (bindings.why_heading) }
            p { (bindings.why) }
            h2 { "How It Works" }
            ol.steps {
                @for step in &bindings.steps {
                    li { (step) }
                }
            }
            a.cta href=(bindings.cta_url) { (bindings.cta_label) }
            @if !related.is_empty() {
                div.related {
                    h2 { (bindings.related_heading) }
                    @for link in related {
                        a href=(link.url) { (link.label) }
                    }
                }
            }
            footer {
                p {
                    "© " a href=(self.site.organization_url) { (self.site.organization) }
                    " | " a href=(self.site.root_url()) { (self.site.name) }
                }
            }
        };

        base_document(&bindings.lang, &bindings.title, &self.css, head, content)
    }
}

/// Pretty JSON safe for embedding inside a `<script>` element.
fn json_ld(value: &serde_json::Value) -> String {
    format!("{value:#}").replace("</", "<\\/")
}

/// gtag loader and page-view event. `id` is validated by config to
/// `[A-Za-z0-9-]`, `tool` is a slug.
fn analytics_snippet(id: &str, tool: &str) -> Markup {
    let src = format!("https://www.googletagmanager.com/gtag/js?id={id}");
    let inline = format!(
        "window.dataLayer = window.dataLayer || [];\n\
         function gtag(){{dataLayer.push(arguments);}}\n\
         gtag('js', new Date());\n\
         gtag('config', '{id}');\n\
         gtag('event', 'page_view', {{'tool_name': '{tool}', 'page_type': 'programmatic_seo'}});"
    );
    html! {
        script async src=(src) {}
        script { (PreEscaped(inline)) }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(lang: &str, title: &str, css: &str, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (head)
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}
