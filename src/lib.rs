//! # Post Index
//!
//! Tag index pages and series navigation for static blog builds.
//!
//! The host publishing tool owns rendering, front matter and file layout.
//! This crate owns the two pieces of indexing logic that sit between the
//! post collection and the renderer.
//!
//! # Architecture: Two Independent Passes
//!
//! ```text
//! Tags     posts  →  annotate (tag_data)  →  bucket  →  build  →  index artifacts
//! Series   (series name, key)  →  binary search over site data  →  { prev, next }
//! ```
//!
//! The tag pass runs once per build over the whole collection. Series lookups
//! run once per post that asks for navigation. They share no state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tags`] | Annotates posts with shared per-tag metadata and groups them by tag |
//! | [`index`] | Turns tag buckets into one index artifact per tag |
//! | [`permalink`] | Derives the tag page prefix from a permalink pattern; builds tag URLs |
//! | [`series`] | Named series registry and prev/next lookup |
//! | [`filters`] | Template-facing helpers (`series_index`, `basename`) |
//! | [`types`] | Shared types (`Document`, `TagMetadata`) |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`site`] | Reads exported site data, runs the passes, writes results |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Best-Effort, Never Failing
//!
//! The indexing passes have no error type. A post without tags gets an empty
//! `tag_data` and no bucket; an unknown series gets "no navigation"; a missing
//! permalink gives an empty prefix. Only reading and writing files can fail.
//!
//! ## Shared Tag Records
//!
//! Every post carrying a tag holds the same `Arc<TagMetadata>`. Templates and
//! caches downstream can compare records by pointer instead of by content.
//!
//! ## Explicit Site Data
//!
//! Series lookups take the registry as an argument. There is no global render
//! context to reach into, so lookups are plain functions that are trivial to
//! test and safe to call from any thread.

pub mod config;
pub mod filters;
pub mod index;
pub mod output;
pub mod permalink;
pub mod series;
pub mod site;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
