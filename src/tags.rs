//! Tag grouping and `tag_data` annotation.
//!
//! One pass over the post collection does two things:
//!
//! 1. **Annotate**: every document gets a `tag_data` list with one
//!    [`TagMetadata`] per distinct tag, in the document's own tag order.
//!    Templates use it to render tag links without recomputing URLs.
//! 2. **Bucket**: documents are grouped by tag into [`TagBuckets`], which
//!    [`crate::index::build`] turns into one index page per tag.
//!
//! ## Shared Metadata
//!
//! Metadata records are memoized by tag string for the duration of one
//! [`annotate`] call. Every document carrying `rust` holds a clone of the
//! same `Arc<TagMetadata>`, so consumers can compare records by pointer.
//! The memo table is dropped when the call returns; separate builds never
//! share records.
//!
//! ## Ordering
//!
//! Buckets iterate in first-seen tag order. Documents inside a bucket keep
//! collection order. A document that lists a tag twice appears once in that
//! tag's bucket.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{Document, TagMetadata};

/// Documents carrying one tag, in collection order.
#[derive(Debug, Clone)]
pub struct TagBucket<'a> {
    pub tag: String,
    pub documents: Vec<&'a Document>,
}

/// Tag → documents, iterated in the order tags were first seen.
#[derive(Debug, Clone, Default)]
pub struct TagBuckets<'a> {
    buckets: Vec<TagBucket<'a>>,
    positions: HashMap<String, usize>,
}

impl<'a> TagBuckets<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, tag: &str, document: &'a Document) {
        match self.positions.get(tag) {
            Some(&pos) => self.buckets[pos].documents.push(document),
            None => {
                self.positions.insert(tag.to_string(), self.buckets.len());
                self.buckets.push(TagBucket {
                    tag: tag.to_string(),
                    documents: vec![document],
                });
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&[&'a Document]> {
        self.positions
            .get(tag)
            .map(|&pos| self.buckets[pos].documents.as_slice())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.tag.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagBucket<'a>> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<'a> IntoIterator for TagBuckets<'a> {
    type Item = TagBucket<'a>;
    type IntoIter = std::vec::IntoIter<TagBucket<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// Annotate every document with `tag_data`, then group by tag.
///
/// The returned buckets borrow the now-annotated documents. Callers that
/// also need to read the collection while holding the buckets should call
/// [`annotate`] and [`bucket`] separately.
pub fn group<'a>(documents: &'a mut [Document], prefix: &str) -> TagBuckets<'a> {
    annotate(documents, prefix);
    bucket(documents)
}

/// Write `tag_data` onto every document.
///
/// Untagged documents get an empty list. Returns the number of distinct
/// tags seen.
pub fn annotate(documents: &mut [Document], prefix: &str) -> usize {
    let mut memo: HashMap<String, Arc<TagMetadata>> = HashMap::new();

    for doc in documents.iter_mut() {
        let tag_data: Vec<Arc<TagMetadata>> = doc
            .distinct_tags()
            .into_iter()
            .map(|tag| match memo.get(tag) {
                Some(meta) => Arc::clone(meta),
                None => {
                    let meta = Arc::new(TagMetadata::new(tag, prefix));
                    memo.insert(tag.to_string(), Arc::clone(&meta));
                    meta
                }
            })
            .collect();
        doc.tag_data = tag_data;
    }

    tracing::debug!(
        documents = documents.len(),
        tags = memo.len(),
        prefix,
        "Annotated documents with tag data"
    );
    memo.len()
}

/// Group documents by tag without touching them.
pub fn bucket(documents: &[Document]) -> TagBuckets<'_> {
    let mut buckets = TagBuckets::new();
    for doc in documents {
        for tag in doc.distinct_tags() {
            buckets.push(tag, doc);
        }
    }
    buckets
}
