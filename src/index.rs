//! Tag index artifacts.
//!
//! Turns grouped [`TagBuckets`] into one [`IndexArtifact`] per tag. The
//! artifact carries everything the host's renderer needs for a tag page:
//! where to write it, what to title it, and which posts to list.
//!
//! ```text
//! prefix = "posts"
//!
//! rust → { path: "posts/tag/rust/index", title: "Tag: rust", documents: [intro, axum] }
//! web  → { path: "posts/tag/web/index",  title: "Tag: web",  documents: [axum, css] }
//! ```

use serde::Serialize;

use crate::permalink;
use crate::tags::TagBuckets;
use crate::types::Document;

/// Prepended to the tag name to form the page title.
pub const TITLE_PREFIX: &str = "Tag: ";

/// A tag page for the host to render.
#[derive(Debug, Clone, Serialize)]
pub struct IndexArtifact<'a> {
    /// Tag this page lists; the title is for display only
    #[serde(skip)]
    pub tag: String,
    /// Target path without extension, e.g. `posts/tag/rust/index`
    pub path: String,
    pub title: String,
    pub documents: Vec<&'a Document>,
}

/// One artifact per bucket, in bucket order. Bucket contents are moved in
/// unchanged.
pub fn build<'a>(buckets: TagBuckets<'a>, prefix: &str) -> Vec<IndexArtifact<'a>> {
    let artifacts: Vec<IndexArtifact<'a>> = buckets
        .into_iter()
        .map(|bucket| IndexArtifact {
            path: permalink::tag_index_path(prefix, &bucket.tag),
            title: format!("{TITLE_PREFIX}{}", bucket.tag),
            tag: bucket.tag,
            documents: bucket.documents,
        })
        .collect();
    tracing::debug!(artifacts = artifacts.len(), prefix, "Built tag index artifacts");
    artifacts
}
