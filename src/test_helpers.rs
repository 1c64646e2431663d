//! Shared test utilities for the post-index test suite.
//!
//! Provides document builders, bucket lookups, and a throwaway site
//! directory for tests that go through the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let docs = vec![doc("intro", &["rust"]), untagged("about")];
//! let buckets = crate::tags::bucket(&docs);
//! assert_eq!(ids(find_bucket(&buckets, "rust")), vec!["intro"]);
//! ```

use std::fs;
use tempfile::TempDir;

use crate::series::SeriesRegistry;
use crate::tags::TagBuckets;
use crate::types::Document;

// =========================================================================
// Builders
// =========================================================================

/// A document with the given tags.
pub fn doc(id: &str, tags: &[&str]) -> Document {
    Document::new(id).with_tags(tags.iter().copied())
}

/// A document whose front matter has no `tags` key.
pub fn untagged(id: &str) -> Document {
    Document::new(id)
}

/// A registry of integer-keyed series.
pub fn int_registry(series: &[(&str, &[i64])]) -> SeriesRegistry<i64> {
    series
        .iter()
        .map(|(name, entries)| (*name, entries.to_vec()))
        .collect()
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Documents under a tag. Panics if the tag has no bucket.
pub fn find_bucket<'b, 'a>(buckets: &'b TagBuckets<'a>, tag: &str) -> &'b [&'a Document] {
    buckets.get(tag).unwrap_or_else(|| {
        let tags: Vec<&str> = buckets.tags().collect();
        panic!("tag '{tag}' not found. Available: {tags:?}")
    })
}

/// Document ids in order.
pub fn ids<'a>(documents: &[&'a Document]) -> Vec<&'a str> {
    documents.iter().map(|d| d.id.as_str()).collect()
}

/// Tags from a document's `tag_data`, in order.
pub fn tag_data_tags(document: &Document) -> Vec<&str> {
    document.tag_data.iter().map(|m| m.tag.as_str()).collect()
}

// =========================================================================
// Site directory
// =========================================================================

/// A source directory with config, four posts, and two series.
///
/// - posts permalink `posts/:title/`
/// - `intro` [rust], `about` (no tags), `axum` [rust, web], `css` [web]
/// - `parts` = [1, 3, 5, 7], `shuffled` = [3, 1, 2]
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        r#"
[collections.posts]
permalink = "posts/:title/"
"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("posts.json"),
        r#"[
  { "id": "intro", "title": "Intro", "tags": ["rust"] },
  { "id": "about", "title": "About" },
  { "id": "axum", "title": "Axum", "tags": ["rust", "web"] },
  { "id": "css", "title": "CSS", "tags": ["web"] }
]"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("series.json"),
        r#"{
  "parts": { "entries": [1, 3, 5, 7] },
  "shuffled": { "entries": [3, 1, 2] }
}"#,
    )
    .unwrap();
    tmp
}
