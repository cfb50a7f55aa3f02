//! Related-page selection for internal cross-linking.
//!
//! Each page links to at most four siblings along two axes:
//!
//! | Axis | Kept | Varied | Max |
//! |------|------|--------|-----|
//! | [`RelatedAxis::StyleVaried`] | scenario, context | style | 2 |
//! | [`RelatedAxis::ScenarioVaried`] | style, context | scenario | 2 |
//!
//! Candidates are tried in catalog order and a page never links to itself.
//! Items are compared by slug form, so two ids that slugify alike (`skip_work`
//! and `skip-work`) count as the same item and are never offered as siblings.
//!
//! ## Industry fallback
//!
//! For an industry page, a scenario-varied sibling normally keeps the same
//! industry. When that slug is not in the page set, the catalog's first
//! industry is substituted instead. The fallback is a best-effort policy: the
//! substituted page can be missing too.
//!
//! ## Link policy
//!
//! Candidates can reference slugs that never became pages. [`LinkPolicy`]
//! decides what happens to them:
//!
//! - [`LinkPolicy::Verified`] skips any candidate whose slug is not in the
//!   final page set and moves on to the next one. The returned identity is the
//!   one that owns the slug after deduplication, so a link whose candidate
//!   lost a slug collision describes the page actually rendered there.
//! - [`LinkPolicy::Unchecked`] emits the first candidates as built.
//!
//! Resolution needs the complete, deduplicated [`PageSet`]; it must not start
//! before enumeration has finished.

use crate::catalog::Catalog;
use crate::enumerate::{ContextKind, PageIdentity, PageSet};
use crate::slug::slugify;
use serde::{Deserialize, Serialize};

/// Style-varied siblings per page.
pub const MAX_STYLE_SIBLINGS: usize = 2;
/// Scenario-varied siblings per page.
pub const MAX_SCENARIO_SIBLINGS: usize = 2;

/// What to do with related candidates that have no page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Only link to slugs present in the final page set.
    #[default]
    Verified,
    /// Link to the first candidates whether or not they were rendered.
    Unchecked,
}

/// Which component a related page varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedAxis {
    StyleVaried,
    ScenarioVaried,
}

/// A page selected for cross-linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedPage<'a> {
    pub axis: RelatedAxis,
    pub identity: PageIdentity<'a>,
}

/// Resolves related pages against a finished page set.
#[derive(Debug, Clone, Copy)]
pub struct RelatedResolver<'s, 'a> {
    catalog: &'a Catalog,
    pages: &'s PageSet<'a>,
    policy: LinkPolicy,
}

impl<'s, 'a> RelatedResolver<'s, 'a> {
    pub fn new(catalog: &'a Catalog, pages: &'s PageSet<'a>, policy: LinkPolicy) -> Self {
        Self {
            catalog,
            pages,
            policy,
        }
    }

    /// Up to [`MAX_STYLE_SIBLINGS`] style-varied pages followed by up to
    /// [`MAX_SCENARIO_SIBLINGS`] scenario-varied pages.
    pub fn resolve(&self, page: &PageIdentity<'a>) -> Vec<RelatedPage<'a>> {
        let mut related = Vec::with_capacity(MAX_STYLE_SIBLINGS + MAX_SCENARIO_SIBLINGS);

        let style_siblings = self
            .catalog
            .styles
            .iter()
            .filter(|style| slugify(&style.id) != slugify(&page.style.id))
            .map(|style| page.with_style(style));
        self.admit(page, RelatedAxis::StyleVaried, style_siblings, MAX_STYLE_SIBLINGS, &mut related);

        let scenario_siblings = self
            .catalog
            .scenarios
            .iter()
            .filter(|scenario| slugify(&scenario.id) != slugify(&page.scenario.id))
            .map(|scenario| self.with_industry_fallback(page.with_scenario(scenario)));
        self.admit(
            page,
            RelatedAxis::ScenarioVaried,
            scenario_siblings,
            MAX_SCENARIO_SIBLINGS,
            &mut related,
        );

        related
    }

    /// Swap in the default industry when an industry candidate has no page.
    fn with_industry_fallback(&self, candidate: PageIdentity<'a>) -> PageIdentity<'a> {
        if candidate.context_kind != ContextKind::Industry || self.pages.contains(candidate.slug()) {
            return candidate;
        }
        match self.catalog.default_industry() {
            Some(industry) => candidate.with_context(industry),
            None => candidate,
        }
    }

    fn admit(
        &self,
        page: &PageIdentity<'a>,
        axis: RelatedAxis,
        candidates: impl Iterator<Item = PageIdentity<'a>>,
        limit: usize,
        related: &mut Vec<RelatedPage<'a>>,
    ) {
        let mut taken = 0;
        for candidate in candidates {
            if taken == limit {
                break;
            }
            if candidate.slug() == page.slug() {
                continue;
            }
            let identity = match self.policy {
                LinkPolicy::Unchecked => candidate,
                LinkPolicy::Verified => match self.pages.get(candidate.slug()) {
                    Some(owner) => owner.clone(),
                    None => continue,
                },
            };
            related.push(RelatedPage { axis, identity });
            taken += 1;
        }
    }
}
