//! Permalink prefix derivation and tag URL building.
//!
//! Tag pages live next to the posts they index. The posts permalink pattern
//! tells us where that is: everything before the `:title` placeholder is the
//! directory posts are published under, and tag pages go below it.
//!
//! ```text
//! permalink           prefix     tag url              index page
//! posts/:title/       posts      posts/tag/rust/      posts/tag/rust/index
//! /blog/:title        /blog      /blog/tag/rust/      /blog/tag/rust/index
//! :title/             (empty)    /tag/rust/           /tag/rust/index
//! (none)              (empty)    /tag/rust/           /tag/rust/index
//! ```
//!
//! All paths are plain string concatenation. Tags are not slugified or
//! escaped; the host is expected to hand over tags that are already safe to
//! put in a path.

/// Placeholder that marks the per-post part of a permalink pattern.
pub const TITLE_PLACEHOLDER: &str = ":title";

/// Static directory portion of a permalink pattern.
///
/// Takes everything before the first `:title` and strips exactly one
/// trailing `/`. A pattern without `:title` is used whole. An absent pattern
/// gives an empty prefix.
pub fn directory_prefix(permalink: Option<&str>) -> String {
    let Some(permalink) = permalink else {
        return String::new();
    };
    let head = permalink
        .find(TITLE_PLACEHOLDER)
        .map_or(permalink, |pos| &permalink[..pos]);
    head.strip_suffix('/').unwrap_or(head).to_string()
}

/// URL of a tag's index page, as linked from each document's `tag_data`.
pub fn tag_url(prefix: &str, tag: &str) -> String {
    format!("{prefix}/tag/{tag}/")
}

/// Target path of a tag's index artifact.
pub fn tag_index_path(prefix: &str, tag: &str) -> String {
    format!("{prefix}/tag/{tag}/index")
}
