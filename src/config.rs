//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` from the site
//! source directory. Stock defaults are serialized to a TOML table and the
//! user file is merged on top, so a config only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Site-wide permalink pattern, used when the posts collection has none
//! # permalink = "/:year/:title/"
//!
//! [collections.posts]
//! # permalink = "posts/:title/"
//!
//! [data]
//! posts = "posts.json"      # Post collection, relative to the source dir
//! series = "series.json"    # Named series, relative to the source dir
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::permalink;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site-wide permalink pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Per-collection settings.
    pub collections: CollectionsConfig,
    /// Data file locations.
    pub data: DataConfig,
}

impl SiteConfig {
    /// Permalink pattern that governs where posts are published.
    ///
    /// The posts collection's own pattern wins over the site-wide one.
    pub fn posts_permalink(&self) -> Option<&str> {
        self.collections
            .posts
            .permalink
            .as_deref()
            .or(self.permalink.as_deref())
    }

    /// Directory prefix for tag pages, derived from [`Self::posts_permalink`].
    pub fn tag_prefix(&self) -> String {
        permalink::directory_prefix(self.posts_permalink())
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.posts.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data.posts must not be empty".into(),
            ));
        }
        if self.data.series.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data.series must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionsConfig {
    pub posts: CollectionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// Permalink pattern for this collection, e.g. `posts/:title/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// Where the host leaves its exported data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// JSON array of posts.
    pub posts: String,
    /// JSON object of named series.
    pub series: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            posts: "posts.json".to_string(),
            series: "series.json".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
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
/// Missing file means stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!(root = %root.display(), "No config.toml, using defaults");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# post-index configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site-wide permalink pattern. Tag pages are written under everything that
# comes before ":title" (minus one trailing slash).
# Used only when [collections.posts] sets no permalink of its own.
# permalink = "/:year/:title/"

# ---------------------------------------------------------------------------
# Collections
# ---------------------------------------------------------------------------
[collections.posts]
# Permalink pattern for posts. Takes precedence over the site-wide one.
#   "posts/:title/"  -> tag pages at posts/tag/<tag>/index
#   (unset)          -> tag pages at /tag/<tag>/index
# permalink = "posts/:title/"

# ---------------------------------------------------------------------------
# Data files (relative to the source directory)
# ---------------------------------------------------------------------------
[data]
# JSON array of posts: [{ "id": "...", "tags": ["..."], ... }]
posts = "posts.json"

# JSON object of named series: { "name": { "entries": [1, 2, 3] } }
# Entries must be strictly ascending.
series = "series.json"
"##
}
