//! Dimension catalog loading and validation.
//!
//! The catalog is the only input data of a generation run: four named
//! dimensions, each an ordered list of items.
//!
//! ```json
//! {
//!   "scenarios":  [{ "id": "skip_work", "name": "Skip Work", "keywords": ["sick", "tired"] }],
//!   "recipients": [{ "id": "boss", "name_en": "Boss", "name_zh": "老板" }],
//!   "styles":     [{ "id": "sincere", "name": "Sincere" }],
//!   "industries": [{ "id": "tech", "name": "Tech Industry" }]
//! }
//! ```
//!
//! ## Display names
//!
//! An item carries one display name per locale. `name` is shorthand for the
//! default locale ([`DEFAULT_LOCALE`]); `name_<locale>` keys add further
//! locales. At least one name is required.
//!
//! ## Validation
//!
//! `scenarios` and `styles` are required and must be non-empty: without them
//! no page can exist. `recipients` and `industries` are optional; when a
//! dimension is absent, the combination family built on it is skipped.
//! Within a dimension, ids must be unique and must produce a non-empty slug.
//!
//! Order matters: item order within each dimension drives enumeration order,
//! first-wins deduplication and related-link selection.

use crate::slug::slugify;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Locale that `name` (without suffix) maps to.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Required dimension '{0}' is missing")]
    MissingDimension(Dimension),
    #[error("Required dimension '{0}' is empty")]
    EmptyDimension(Dimension),
    #[error("Item '{id}' in '{dimension}' has no display name")]
    MissingName { dimension: Dimension, id: String },
    #[error("Item id '{id}' in '{dimension}' is not a URL-safe token ([A-Za-z0-9_-])")]
    InvalidId { dimension: Dimension, id: String },
    #[error("Duplicate item id '{id}' in '{dimension}'")]
    DuplicateId { dimension: Dimension, id: String },
}

/// The four logical roles a dimension can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Scenario,
    Recipient,
    Style,
    Industry,
}

impl Dimension {
    /// Key of the dimension's array in the catalog document.
    pub fn key(self) -> &'static str {
        match self {
            Self::Scenario => "scenarios",
            Self::Recipient => "recipients",
            Self::Style => "styles",
            Self::Industry => "industries",
        }
    }

    /// Singular form, used as a query parameter name.
    pub fn param(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Recipient => "recipient",
            Self::Style => "style",
            Self::Industry => "industry",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One value along a dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionItem {
    /// Stable identifier, as written in the catalog.
    pub id: String,
    /// Display names keyed by locale.
    pub names: BTreeMap<String, String>,
    /// Search keywords, in catalog order.
    pub keywords: Vec<String>,
}

impl DimensionItem {
    /// Item with a single default-locale name and no keywords.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut names = BTreeMap::new();
        names.insert(DEFAULT_LOCALE.to_string(), name.into());
        Self {
            id: id.into(),
            names,
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, locale: &str, name: impl Into<String>) -> Self {
        self.names.insert(locale.to_string(), name.into());
        self
    }

    /// Display name for `locale`, falling back to the default locale, then to
    /// any name, then to the raw id.
    pub fn name(&self, locale: &str) -> &str {
        self.names
            .get(locale)
            .or_else(|| self.names.get(DEFAULT_LOCALE))
            .or_else(|| self.names.values().next())
            .map(String::as_str)
            .unwrap_or(&self.id)
    }
}

/// The full set of dimensions for one run. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub scenarios: Vec<DimensionItem>,
    pub styles: Vec<DimensionItem>,
    /// `None` when the catalog has no `recipients` key.
    pub recipients: Option<Vec<DimensionItem>>,
    /// `None` when the catalog has no `industries` key.
    pub industries: Option<Vec<DimensionItem>>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let catalog = Self {
            scenarios: required(raw.scenarios, Dimension::Scenario)?,
            styles: required(raw.styles, Dimension::Style)?,
            recipients: optional(raw.recipients, Dimension::Recipient)?,
            industries: optional(raw.industries, Dimension::Industry)?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Items of a dimension, or `None` if the catalog does not define it.
    pub fn items(&self, dimension: Dimension) -> Option<&[DimensionItem]> {
        match dimension {
            Dimension::Scenario => Some(&self.scenarios),
            Dimension::Style => Some(&self.styles),
            Dimension::Recipient => self.recipients.as_deref(),
            Dimension::Industry => self.industries.as_deref(),
        }
    }

    /// The industry substituted when an industry page has no same-industry
    /// sibling: the first one in catalog order.
    pub fn default_industry(&self) -> Option<&DimensionItem> {
        self.industries.as_ref().and_then(|i| i.first())
    }

    /// Check structural rules that serde cannot express.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.scenarios.is_empty() {
            return Err(CatalogError::EmptyDimension(Dimension::Scenario));
        }
        if self.styles.is_empty() {
            return Err(CatalogError::EmptyDimension(Dimension::Style));
        }
        for dimension in [
            Dimension::Scenario,
            Dimension::Recipient,
            Dimension::Style,
            Dimension::Industry,
        ] {
            let Some(items) = self.items(dimension) else {
                continue;
            };
            let mut seen = HashSet::new();
            for item in items {
                if !is_id_token(&item.id) {
                    return Err(CatalogError::InvalidId {
                        dimension,
                        id: item.id.clone(),
                    });
                }
                if !seen.insert(item.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        dimension,
                        id: item.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Ids land raw in page slugs and in query strings, so they are limited to
/// `[A-Za-z0-9_-]` and must keep at least one alphanumeric.
fn is_id_token(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !slugify(id).is_empty()
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    Catalog::from_json(&content)
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawCatalog {
    scenarios: Option<Vec<RawItem>>,
    recipients: Option<Vec<RawItem>>,
    styles: Option<Vec<RawItem>>,
    industries: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    /// Catches `name_<locale>` keys; anything else is ignored.
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl RawItem {
    fn into_item(self, dimension: Dimension) -> Result<DimensionItem, CatalogError> {
        let mut names = BTreeMap::new();
        for (key, value) in self.extra {
            let Some(locale) = key.strip_prefix("name_") else {
                continue;
            };
            match value {
                serde_json::Value::String(name) if !locale.is_empty() && !name.trim().is_empty() => {
                    names.insert(locale.to_string(), name);
                }
                _ => {}
            }
        }
        if let Some(name) = self.name.filter(|n| !n.trim().is_empty()) {
            names.insert(DEFAULT_LOCALE.to_string(), name);
        }
        if names.is_empty() {
            return Err(CatalogError::MissingName {
                dimension,
                id: self.id,
            });
        }
        let keywords = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Ok(DimensionItem {
            id: self.id,
            names,
            keywords,
        })
    }
}

fn convert(items: Vec<RawItem>, dimension: Dimension) -> Result<Vec<DimensionItem>, CatalogError> {
    items
        .into_iter()
        .map(|item| item.into_item(dimension))
        .collect()
}

fn required(
    items: Option<Vec<RawItem>>,
    dimension: Dimension,
) -> Result<Vec<DimensionItem>, CatalogError> {
    match items {
        Some(items) => convert(items, dimension),
        None => Err(CatalogError::MissingDimension(dimension)),
    }
}

fn optional(
    items: Option<Vec<RawItem>>,
    dimension: Dimension,
) -> Result<Option<Vec<DimensionItem>>, CatalogError> {
    items.map(|items| convert(items, dimension)).transpose()
}
