//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what was indexed (tags, series, counts) and shows file
//! locations as secondary context on indented lines.
//!
//! # Output Format
//!
//! ## Tags
//!
//! ```text
//! Prefix: posts
//! Tags
//! 001 rust (2 posts)
//!     Page: posts/tag/rust/index
//! 002 web (2 posts)
//!     Page: posts/tag/web/index
//! Untagged
//!     about
//!
//! Generated 2 tag pages from 4 posts → dist
//! ```
//!
//! ## Series
//!
//! ```text
//! parts @ 3
//!     prev: 1
//!     next: 5
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::series::{Navigation, SeriesKey};
use crate::site::{CheckReport, TagIndexReport};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 post`, `3 posts`
fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Prefix display: the empty prefix means site root.
fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() { "(site root)" } else { prefix }
}

// ============================================================================
// Tags
// ============================================================================

pub fn format_tag_output(report: &TagIndexReport) -> Vec<String> {
    let mut lines = vec![format!("Prefix: {}", display_prefix(&report.prefix))];

    lines.push("Tags".to_string());
    for (i, (tag, path, count)) in report.tags.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            tag,
            plural(*count, "post", "posts")
        ));
        lines.push(format!("{}Page: {}", indent(1), path));
    }

    if !report.untagged.is_empty() {
        lines.push("Untagged".to_string());
        for id in &report.untagged {
            lines.push(format!("{}{}", indent(1), id));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} from {} → {}",
        plural(report.tags.len(), "tag page", "tag pages"),
        plural(report.document_count, "post", "posts"),
        report.output_dir.display()
    ));
    lines
}

pub fn print_tag_output(report: &TagIndexReport) {
    for line in format_tag_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Series
// ============================================================================

pub fn format_navigation(
    name: &str,
    key: &SeriesKey,
    nav: Option<&Navigation<SeriesKey>>,
) -> Vec<String> {
    let mut lines = vec![format!("{} @ {}", name, key)];
    match nav {
        None => lines.push(format!("{}no navigation", indent(1))),
        Some(nav) => {
            let side = |k: &Option<SeriesKey>| {
                k.as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string())
            };
            lines.push(format!("{}prev: {}", indent(1), side(&nav.prev)));
            lines.push(format!("{}next: {}", indent(1), side(&nav.next)));
        }
    }
    lines
}

pub fn print_navigation(name: &str, key: &SeriesKey, nav: Option<&Navigation<SeriesKey>>) {
    for line in format_navigation(name, key, nav) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        format!("Prefix: {}", display_prefix(&report.prefix)),
        format!(
            "Posts: {} ({} untagged)",
            report.document_count, report.untagged_count
        ),
        format!("Tags: {}", report.tag_count),
    ];

    if !report.series.is_empty() {
        lines.push("Series".to_string());
        for (i, (name, count)) in report.series.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                name,
                plural(*count, "entry", "entries")
            ));
            if report.unsorted_series.contains(name) {
                lines.push(format!("{}Warning: entries not strictly ascending", indent(1)));
            }
        }
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
