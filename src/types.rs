//! Shared types used across the indexing passes.
//!
//! Documents come from the host as JSON and go back out annotated, so these
//! types must round-trip through serde without losing any host fields.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::permalink;

/// A post handed over by the host collection.
///
/// Only `tags` is read by the indexing passes, and only `tag_data` is
/// written. Everything else the host put on the document lands in `data` and
/// is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Host identity (slug, path, or whatever the collection keys on)
    pub id: String,
    /// Tags in the order the author listed them. `None` when the front
    /// matter has no `tags` key at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// One record per distinct tag, filled in by [`crate::tags::annotate`]
    #[serde(default)]
    pub tag_data: Vec<Arc<TagMetadata>>,
    /// Remaining front matter
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Tags as listed, or an empty slice when the field is absent.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Tags with repeats dropped, first occurrence wins.
    ///
    /// ```text
    /// ["rust", "cli", "rust"] → ["rust", "cli"]
    /// ```
    pub fn distinct_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tags()
            .iter()
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags().is_empty()
    }
}

/// Per-tag record attached to every document carrying the tag.
///
/// Built once per distinct tag per grouping pass and shared through an
/// `Arc`, so two documents with the same tag point at the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagMetadata {
    pub tag: String,
    /// Link to the tag's index page, e.g. `posts/tag/rust/`
    pub url: String,
}

impl TagMetadata {
    pub fn new(tag: &str, prefix: &str) -> Self {
        Self {
            tag: tag.to_string(),
            url: permalink::tag_url(prefix, tag),
        }
    }
}
