//! Generator configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` in the config directory overrides
//! any subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://excuse.demo.densematrix.ai"  # Tool root, no trailing slash
//! name = "AI Excuse Generator"     # Appended to every page title
//! locale = "en"                    # Which catalog display names to use
//! noun = "Excuse"                  # What the tool produces, singular
//! noun_plural = "Excuses"
//! organization = "DenseMatrix"     # Footer and structured-data author
//! organization_url = "https://densematrix.ai"
//! og_image = "og-image.png"        # Relative to base_url
//! # analytics_id = "G-XXXXXXX"     # Adds the gtag snippet when set
//!
//! [output]
//! public_dir = "public"            # Output root (CLI --output overrides)
//! pages_dir = "p"                  # Pages land in <public_dir>/<pages_dir>/<slug>/
//! progress_interval = 1000         # Report progress every N pages
//!
//! [related]
//! policy = "verified"              # "verified" or "unchecked"
//!
//! [colors]
//! background = "#faf8f5"
//! text = "#2d2d2d"
//! text_muted = "#666666"           # Footer, secondary copy
//! border = "#dddddd"
//! accent = "#e74c3c"               # Call-to-action button, related links
//! accent_hover = "#c0392b"
//!
//! [processing]
//! max_processes = 4                # Max render workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::related::LinkPolicy;
use crate::slug::is_slug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity of the tool the pages advertise.
    pub site: SiteSection,
    /// Where and how output is written.
    pub output: OutputConfig,
    /// Related-link behavior.
    pub related: RelatedConfig,
    /// Page palette.
    pub colors: ColorScheme,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.site.noun.trim().is_empty() || self.site.noun_plural.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.noun and site.noun_plural must not be empty".into(),
            ));
        }
        if let Some(id) = &self.site.analytics_id {
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(ConfigError::Validation(
                    "site.analytics_id may only contain letters, digits and '-'".into(),
                ));
            }
        }
        if !is_slug(&self.output.pages_dir) {
            return Err(ConfigError::Validation(
                "output.pages_dir must be a lowercase URL-safe token".into(),
            ));
        }
        if self.output.progress_interval == 0 {
            return Err(ConfigError::Validation(
                "output.progress_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Identity of the tool the landing pages point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute URL of the tool root.
    pub base_url: String,
    /// Tool name, appended to page titles.
    pub name: String,
    /// Locale used to pick catalog display names and the `lang` attribute.
    pub locale: String,
    /// What the tool produces, singular and capitalized (e.g. "Excuse").
    pub noun: String,
    /// Plural of `noun`.
    pub noun_plural: String,
    /// Publisher shown in the footer and in structured data.
    pub organization: String,
    pub organization_url: String,
    /// Social preview image, relative to `base_url`.
    pub og_image: String,
    /// Google Analytics measurement id. No analytics snippet when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,
}

impl SiteSection {
    /// Base URL without a trailing slash.
    pub fn root_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: "https://excuse.demo.densematrix.ai".to_string(),
            name: "AI Excuse Generator".to_string(),
            locale: "en".to_string(),
            noun: "Excuse".to_string(),
            noun_plural: "Excuses".to_string(),
            organization: "DenseMatrix".to_string(),
            organization_url: "https://densematrix.ai".to_string(),
            og_image: "og-image.png".to_string(),
            analytics_id: None,
        }
    }
}

/// Output layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Public output root, relative to the working directory.
    pub public_dir: String,
    /// Directory under the public root holding one subdirectory per page.
    /// Also the first path segment of every canonical page URL.
    pub pages_dir: String,
    /// Emit a progress event every this many written pages.
    pub progress_interval: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            pages_dir: "p".to_string(),
            progress_interval: 1000,
        }
    }
}

/// Related-link settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelatedConfig {
    pub policy: LinkPolicy,
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Page palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (footer, captions).
    pub text_muted: String,
    pub border: String,
    /// Call-to-action background and related link color.
    pub accent: String,
    pub accent_hover: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#faf8f5".to_string(),
            text: "#2d2d2d".to_string(),
            text_muted: "#666666".to_string(),
            border: "#dddddd".to_string(),
            accent: "#e74c3c".to_string(),
            accent_hover: "#c0392b".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# seo-pages Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# The tool the landing pages advertise
# ---------------------------------------------------------------------------
[site]
# Absolute URL of the tool. Page URLs are <base_url>/<pages_dir>/<slug>/.
base_url = "https://excuse.demo.densematrix.ai"

# Tool name, appended to every page title.
name = "AI Excuse Generator"

# Which catalog display names to use (name_<locale> keys; "name" is "en").
locale = "en"

# What the tool produces, used in titles and copy.
noun = "Excuse"
noun_plural = "Excuses"

# Publisher shown in the footer and in structured data.
organization = "DenseMatrix"
organization_url = "https://densematrix.ai"

# Social preview image, relative to base_url.
og_image = "og-image.png"

# Google Analytics measurement id. Leave commented out for no analytics.
# analytics_id = "G-XXXXXXX"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Output root. The --output flag overrides it.
public_dir = "public"

# Pages are written to <public_dir>/<pages_dir>/<slug>/index.html.
pages_dir = "p"

# Print progress every N written pages.
progress_interval = 1000

# ---------------------------------------------------------------------------
# Related links
# ---------------------------------------------------------------------------
[related]
# "verified": only link to pages that exist in this run.
# "unchecked": link to the first candidates even if they were never rendered.
policy = "verified"

# ---------------------------------------------------------------------------
# Page palette
# ---------------------------------------------------------------------------
[colors]
background = "#faf8f5"
text = "#2d2d2d"
text_muted = "#666666"    # Footer, secondary copy
border = "#dddddd"
accent = "#e74c3c"        # Call-to-action button, related links
accent_hover = "#c0392b"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from the palette.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site.base_url, "https://excuse.demo.densematrix.ai");
        assert_eq!(config.site.locale, "en");
        assert_eq!(config.site.analytics_id, None);
    }

    #[test]
    fn default_config_has_output_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.output.public_dir, "public");
        assert_eq!(config.output.pages_dir, "p");
        assert_eq!(config.output.progress_interval, 1000);
        assert_eq!(config.related.policy, LinkPolicy::Verified);
    }

    #[test]
    fn root_url_strips_trailing_slash() {
        let mut site = SiteSection::default();
        site.base_url = "https://example.com/".to_string();
        assert_eq!(site.root_url(), "https://example.com");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#4361ee"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.accent, "#4361ee");
        // Default values preserved
        assert_eq!(config.colors.background, "#faf8f5");
        assert_eq!(config.output.pages_dir, "p");
    }

    #[test]
    fn parse_site_and_related() {
        let toml = r#"
[site]
base_url = "https://tool.example"
analytics_id = "G-ABC123"

[related]
policy = "unchecked"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.base_url, "https://tool.example");
        assert_eq!(config.site.analytics_id.as_deref(), Some("G-ABC123"));
        assert_eq!(config.related.policy, LinkPolicy::Unchecked);
        // Unspecified site keys keep their defaults
        assert_eq!(config.site.noun, "Excuse");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorScheme::default();
        colors.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("--color-bg: #faf8f5"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorScheme::default());
        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-text:"));
        assert!(css.contains("--color-text-muted:"));
        assert!(css.contains("--color-border:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--color-accent-hover:"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.name, "AI Excuse Generator");
        assert_eq!(config.output.progress_interval, 1000);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
base_url = "https://example.com"
name = "Example Tool"

[output]
progress_interval = 50
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.name, "Example Tool");
        assert_eq!(config.output.progress_interval, 50);
        // Unspecified values should be defaults
        assert_eq!(config.site.organization, "DenseMatrix");
        assert_eq!(config.output.pages_dir, "p");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[output]
progress_interval = 0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"interval = 1000"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"interval = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("interval").unwrap().as_integer(), Some(10));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[site]
name = "A"
noun = "Excuse"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
name = "B"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let site = merged.get("site").unwrap();
        assert_eq!(site.get("name").unwrap().as_str(), Some("B"));
        assert_eq!(site.get("noun").unwrap().as_str(), Some("Excuse"));
    }

    #[test]
    fn merge_toml_adds_new_keys() {
        let base: toml::Value = toml::from_str(r#"a = 1"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"b = 2"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[output]
pages_dirr = "x"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[sitemap]
priority = 0.5
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_policy_rejected() {
        let toml_str = r#"
[related]
policy = "sometimes"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
titel = "oops"
"#,
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_url_scheme() {
        let mut config = SiteConfig::default();
        config.site.base_url = "excuse.example".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));

        config.site.base_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_pages_dir_is_slug() {
        let mut config = SiteConfig::default();
        config.output.pages_dir = "Pages Dir".to_string();
        assert!(config.validate().is_err());

        config.output.pages_dir = String::new();
        assert!(config.validate().is_err());

        config.output.pages_dir = "landing".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_analytics_id_characters() {
        let mut config = SiteConfig::default();
        config.site.analytics_id = Some("G-P4ZLGKH1E1".to_string());
        assert!(config.validate().is_ok());

        config.site.analytics_id = Some("G-1');alert(1);//".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_noun() {
        let mut config = SiteConfig::default();
        config.site.noun = " ".to_string();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn resolve_config_with_no_overlay() {
        let base = stock_defaults_value().unwrap();
        let config = resolve_config(base, None).unwrap();
        assert_eq!(config.output.pages_dir, "p");
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
base_url = "ftp://nope"
"#,
        )
        .unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.get("site").is_some());
        assert!(val.get("output").is_some());
        assert!(val.get("related").is_some());
        assert!(val.get("colors").is_some());
        assert!(val.get("processing").is_some());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.base_url, defaults.site.base_url);
        assert_eq!(config.site.name, defaults.site.name);
        assert_eq!(config.output.pages_dir, defaults.output.pages_dir);
        assert_eq!(
            config.output.progress_interval,
            defaults.output.progress_interval
        );
        assert_eq!(config.related.policy, defaults.related.policy);
        assert_eq!(config.colors.accent, defaults.colors.accent);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[output]"));
        assert!(content.contains("[related]"));
        assert!(content.contains("[colors]"));
        assert!(content.contains("[processing]"));
    }
}
