//! Combination enumeration and slug-keyed deduplication.
//!
//! Two families of page identities are expanded over the catalog:
//!
//! ```text
//! Family A: scenario × recipient × style
//! Family B: scenario × industry  × style
//! ```
//!
//! Loops run scenario (outer) → context → style (inner), each in catalog
//! order, and Family A is fully enumerated before Family B starts. That order
//! is observable: it is the sitemap order and it decides which tuple survives
//! a slug collision.
//!
//! ## Deduplication
//!
//! Identities are collected into a [`PageSet`], an insertion-ordered set
//! keyed by slug. The first identity to claim a slug keeps it; any later
//! candidate with the same slug is rejected and counted. A Family B tuple
//! whose slug matches a Family A tuple therefore never produces a page.
//!
//! A family whose context dimension is absent from the catalog is skipped.

use crate::catalog::{Catalog, Dimension, DimensionItem};
use crate::slug::join_slug;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Which context family a page identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Recipient,
    Industry,
}

impl ContextKind {
    /// Families in enumeration order.
    pub const ALL: [ContextKind; 2] = [ContextKind::Recipient, ContextKind::Industry];

    pub fn dimension(self) -> Dimension {
        match self {
            Self::Recipient => Dimension::Recipient,
            Self::Industry => Dimension::Industry,
        }
    }
}

/// A `(scenario, context, style)` tuple, borrowing its items from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIdentity<'a> {
    pub scenario: &'a DimensionItem,
    pub context_kind: ContextKind,
    pub context: &'a DimensionItem,
    pub style: &'a DimensionItem,
    slug: String,
}

impl<'a> PageIdentity<'a> {
    pub fn new(
        scenario: &'a DimensionItem,
        context_kind: ContextKind,
        context: &'a DimensionItem,
        style: &'a DimensionItem,
    ) -> Self {
        let slug = join_slug(&[&scenario.id, &context.id, &style.id]);
        Self {
            scenario,
            context_kind,
            context,
            style,
            slug,
        }
    }

    /// `scenario-context-style`, URL-safe.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Same scenario and context, another style.
    pub fn with_style(&self, style: &'a DimensionItem) -> Self {
        Self::new(self.scenario, self.context_kind, self.context, style)
    }

    /// Same style and context, another scenario.
    pub fn with_scenario(&self, scenario: &'a DimensionItem) -> Self {
        Self::new(scenario, self.context_kind, self.context, self.style)
    }

    /// Same scenario, style and family, another context item.
    pub fn with_context(&self, context: &'a DimensionItem) -> Self {
        Self::new(self.scenario, self.context_kind, context, self.style)
    }
}

/// Insertion-ordered set of page identities keyed by slug.
#[derive(Debug, Default)]
pub struct PageSet<'a> {
    pages: IndexMap<String, PageIdentity<'a>>,
    duplicates: usize,
}

impl<'a> PageSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity unless its slug is already taken.
    ///
    /// Returns `true` if the identity was admitted.
    pub fn insert(&mut self, identity: PageIdentity<'a>) -> bool {
        match self.pages.entry(identity.slug.clone()) {
            Entry::Occupied(_) => {
                self.duplicates += 1;
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(identity);
                true
            }
        }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.pages.contains_key(slug)
    }

    /// The identity that owns `slug`, if any.
    pub fn get(&self, slug: &str) -> Option<&PageIdentity<'a>> {
        self.pages.get(slug)
    }

    /// The identity admitted at position `index`.
    pub fn get_index(&self, index: usize) -> Option<&PageIdentity<'a>> {
        self.pages.get_index(index).map(|(_, page)| page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of candidates rejected because their slug was already taken.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Number of admitted identities of one family.
    pub fn count(&self, kind: ContextKind) -> usize {
        self.pages.values().filter(|p| p.context_kind == kind).count()
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, PageIdentity<'a>> {
        self.pages.values()
    }

    /// Slugs in insertion order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

impl<'s, 'a> IntoIterator for &'s PageSet<'a> {
    type Item = &'s PageIdentity<'a>;
    type IntoIter = indexmap::map::Values<'s, String, PageIdentity<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.values()
    }
}

/// Expand both combination families into a deduplicated page set.
pub fn enumerate(catalog: &Catalog) -> PageSet<'_> {
    let mut pages = PageSet::new();
    for kind in ContextKind::ALL {
        let Some(contexts) = catalog.items(kind.dimension()) else {
            continue;
        };
        for scenario in &catalog.scenarios {
            for context in contexts {
                for style in &catalog.styles {
                    pages.insert(PageIdentity::new(scenario, kind, context, style));
                }
            }
        }
    }
    pages
}
