//! Template-facing helpers.
//!
//! These are the callables a host exposes to its templates. They take the
//! site data they need as explicit arguments instead of reaching into a
//! global render context.

use std::path::Path;

use crate::series::{self, Navigation, SeriesRegistry};

/// Source extension stripped by [`basename`].
pub const SOURCE_EXTENSION: &str = ".adoc";

/// Final path component with a trailing `.adoc` removed.
///
/// Other extensions are kept, and a name that is nothing but `.adoc` is left
/// alone.
///
/// ```text
/// _posts/2024-01-01-hello.adoc  → 2024-01-01-hello
/// _posts/notes.md               → notes.md
/// drafts/                       → drafts
/// ```
pub fn basename(input: &str) -> &str {
    let name = Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(input);
    match name.strip_suffix(SOURCE_EXTENSION) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// `{{ page.key | series_index: "name" }}` as a function.
///
/// See [`series::resolve`] for the lookup policy.
pub fn series_index<K: Ord + Clone>(
    input: &K,
    series_name: &str,
    registry: &SeriesRegistry<K>,
) -> Option<Navigation<K>> {
    series::resolve(registry, series_name, input)
}
