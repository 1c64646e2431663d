//! Site data loading and tag index output.
//!
//! The host publishing tool exports its post collection and series data as
//! JSON into a source directory. This module reads those files, runs the
//! indexing passes, and writes the results where the host's renderer picks
//! them up.
//!
//! ```text
//! site/                         # Source directory
//! ├── config.toml               # Optional, see [`crate::config`]
//! ├── posts.json                # [{ "id": "...", "tags": [...], ... }]
//! └── series.json               # { "name": { "entries": [...] } } (optional)
//!
//! dist/                         # Output directory
//! ├── documents.json            # posts.json with tag_data filled in
//! └── tag-index.json            # one { path, title, documents } per tag
//! ```
//!
//! A missing `series.json` is an empty registry; every lookup then reports
//! "no navigation". A missing `posts.json` is an error.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, SiteConfig};
use crate::index;
use crate::series::{self, Navigation, Series, SeriesKey, SeriesRegistry};
use crate::tags;
use crate::types::Document;

/// Annotated posts, written next to the tag index.
pub const DOCUMENTS_FILE: &str = "documents.json";
/// Tag index artifacts.
pub const TAG_INDEX_FILE: &str = "tag-index.json";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a JSON array of posts.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, SiteError> {
    let content = read_file(path)?;
    let documents: Vec<Document> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = documents.len(), "Loaded documents");
    Ok(documents)
}

/// Read named series. A missing file gives an empty registry.
///
/// Each series is parsed on its own: one with entries that are not keys
/// (booleans, objects) is skipped with a warning and the rest still load.
pub fn load_series(path: &Path) -> Result<SeriesRegistry<SeriesKey>, SiteError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No series data");
        return Ok(SeriesRegistry::new());
    }
    let content = read_file(path)?;
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;

    let mut registry = SeriesRegistry::new();
    for (name, value) in raw {
        match serde_json::from_value::<Series<SeriesKey>>(value) {
            Ok(series) => registry.insert(name, series.entries),
            Err(e) => tracing::warn!(series = %name, error = %e, "Skipping malformed series"),
        }
    }
    tracing::debug!(path = %path.display(), count = registry.len(), "Loaded series");
    Ok(registry)
}

fn read_file(path: &Path) -> Result<String, SiteError> {
    fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// What a tag index build produced, for display.
#[derive(Debug, Clone, Serialize)]
pub struct TagIndexReport {
    pub prefix: String,
    pub document_count: usize,
    /// `(tag, path, document count)` in artifact order
    pub tags: Vec<(String, String, usize)>,
    /// Ids of documents that ended up in no bucket
    pub untagged: Vec<String>,
    pub output_dir: PathBuf,
}

/// Load posts, annotate and group them, and write both output files.
pub fn build_tag_index(source: &Path, output: &Path) -> Result<TagIndexReport, SiteError> {
    let config = config::load_config(source)?;
    let mut documents = load_documents(&source.join(&config.data.posts))?;
    let prefix = config.tag_prefix();

    tags::annotate(&mut documents, &prefix);
    let artifacts = index::build(tags::bucket(&documents), &prefix);

    fs::create_dir_all(output)?;
    fs::write(
        output.join(DOCUMENTS_FILE),
        serde_json::to_string_pretty(&documents)?,
    )?;
    fs::write(
        output.join(TAG_INDEX_FILE),
        serde_json::to_string_pretty(&artifacts)?,
    )?;

    tracing::info!(
        tags = artifacts.len(),
        documents = documents.len(),
        output = %output.display(),
        "Wrote tag index"
    );

    Ok(TagIndexReport {
        prefix,
        document_count: documents.len(),
        tags: artifacts
            .iter()
            .map(|a| (a.tag.clone(), a.path.clone(), a.documents.len()))
            .collect(),
        untagged: documents
            .iter()
            .filter(|d| !d.is_tagged())
            .map(|d| d.id.clone())
            .collect(),
        output_dir: output.to_path_buf(),
    })
}

/// A series lookup as the CLI reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLookup {
    /// The query key, parsed to match the series' key kind
    pub key: SeriesKey,
    pub navigation: Option<Navigation<SeriesKey>>,
}

/// Resolve navigation for one raw key, reading series data from the source
/// dir. The key is parsed against the kind of keys the series stores.
pub fn lookup_series(
    source: &Path,
    name: &str,
    raw_key: &str,
    exact: bool,
) -> Result<SeriesLookup, SiteError> {
    let config = config::load_config(source)?;
    let registry = load_series(&source.join(&config.data.series))?;
    let key = registry.key_for(name, raw_key);
    let navigation = if exact {
        series::resolve_exact(&registry, name, &key)
    } else {
        series::resolve(&registry, name, &key)
    };
    Ok(SeriesLookup { key, navigation })
}

/// Result of validating a source directory without writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub prefix: String,
    pub document_count: usize,
    pub tag_count: usize,
    pub untagged_count: usize,
    /// `(name, entry count)` alphabetically
    pub series: Vec<(String, usize)>,
    /// Series whose entries are not strictly ascending
    pub unsorted_series: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.unsorted_series.is_empty()
    }
}

/// Load everything and report on it.
///
/// Unsorted series are reported, not rejected: lookups against them still
/// run, they just give wrong neighbors.
pub fn check(source: &Path) -> Result<CheckReport, SiteError> {
    let config: SiteConfig = config::load_config(source)?;
    let documents = load_documents(&source.join(&config.data.posts))?;
    let registry = load_series(&source.join(&config.data.series))?;

    let buckets = tags::bucket(&documents);
    let unsorted_series: Vec<String> = registry
        .unsorted()
        .into_iter()
        .map(String::from)
        .collect();
    for name in &unsorted_series {
        tracing::warn!(series = %name, "Series entries are not strictly ascending");
    }

    Ok(CheckReport {
        prefix: config.tag_prefix(),
        document_count: documents.len(),
        tag_count: buckets.len(),
        untagged_count: documents.iter().filter(|d| !d.is_tagged()).count(),
        series: registry
            .summary()
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect(),
        unsorted_series,
    })
}
