//! Series navigation.
//!
//! A series is a named, curated reading order: an ascending list of position
//! keys (post dates, part numbers, slugs) kept in site data. Each post in a
//! series asks for its neighbors to render "previous / next" links.
//!
//! ```json
//! {
//!   "async-rust": { "entries": [1, 3, 5, 7] },
//!   "parser-notes": { "entries": ["2023-01-04", "2023-02-11"] }
//! }
//! ```
//!
//! ## Lookup Policy
//!
//! [`resolve`] finds the lower bound of the query key (first entry `>=` key)
//! and treats the key as if it sat at that position:
//!
//! ```text
//! entries = [1, 3, 5, 7]
//!
//! key 3 → idx 1 → prev 1,    next 5
//! key 1 → idx 0 → prev none, next 3
//! key 7 → idx 3 → prev 5,    next none
//! key 4 → idx 2 → prev 3,    next 7      (4 takes 5's slot)
//! key 9 → idx 4 → prev 7,    next none
//! ```
//!
//! For a key that is not in the series this skips the entry at the insertion
//! point. Callers that only want navigation for actual members use
//! [`resolve_exact`].
//!
//! Entries must be strictly ascending. Nothing here checks that; an unsorted
//! series gives wrong neighbors, not an error. [`SeriesRegistry::unsorted`]
//! exists so a build can report bad data up front.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Position key as found in site data.
///
/// Numbers compare numerically with each other (an integer sorts just before
/// an equal float) and every number sorts before every string, so a series
/// should stick to one kind. Floats use [`f64::total_cmp`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SeriesKey {
    /// Parse `raw` as the same kind of key as `like`.
    ///
    /// `"002"` against a text series stays `Text("002")`; against an
    /// integer series it becomes `Int(2)`. Falls back to [`FromStr`] when
    /// `raw` does not fit the kind.
    pub fn parse_like(raw: &str, like: &SeriesKey) -> SeriesKey {
        match like {
            SeriesKey::Text(_) => SeriesKey::Text(raw.to_string()),
            SeriesKey::Int(_) => raw
                .parse::<i64>()
                .map(SeriesKey::Int)
                .unwrap_or_else(|_| SeriesKey::parse_loose(raw)),
            SeriesKey::Float(_) => raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(SeriesKey::Float)
                .unwrap_or_else(|| SeriesKey::parse_loose(raw)),
        }
    }

    fn parse_loose(raw: &str) -> SeriesKey {
        if let Ok(n) = raw.parse::<i64>() {
            return SeriesKey::Int(n);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => SeriesKey::Float(f),
            _ => SeriesKey::Text(raw.to_string()),
        }
    }
}

impl Ord for SeriesKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use SeriesKey::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for SeriesKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SeriesKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SeriesKey {}

impl Hash for SeriesKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            SeriesKey::Int(n) => (0u8, n).hash(state),
            SeriesKey::Float(f) => (1u8, f.to_bits()).hash(state),
            SeriesKey::Text(s) => (2u8, s).hash(state),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Int(n) => write!(f, "{n}"),
            SeriesKey::Float(x) => write!(f, "{x}"),
            SeriesKey::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for SeriesKey {
    type Err = std::convert::Infallible;

    /// Integer if it parses as one, then a finite float, otherwise text.
    ///
    /// This ignores what the target series holds; prefer
    /// [`SeriesRegistry::key_for`] when the series is known.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SeriesKey::parse_loose(s))
    }
}

impl From<i64> for SeriesKey {
    fn from(n: i64) -> Self {
        SeriesKey::Int(n)
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        SeriesKey::Text(s.to_string())
    }
}

/// One named series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<K> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<K>,
}

/// Named series, as loaded from site data. Read-only during lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesRegistry<K> {
    series: BTreeMap<String, Series<K>>,
}

impl<K> Default for SeriesRegistry<K> {
    fn default() -> Self {
        Self {
            series: BTreeMap::new(),
        }
    }
}

impl<K> SeriesRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, entries: Vec<K>) {
        self.series.insert(name.into(), Series { entries });
    }

    pub fn entries(&self, name: &str) -> Option<&[K]> {
        self.series.get(name).map(|s| s.entries.as_slice())
    }

    /// Series names with their entry counts, alphabetically.
    pub fn summary(&self) -> Vec<(&str, usize)> {
        self.series
            .iter()
            .map(|(name, s)| (name.as_str(), s.entries.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl<K: Ord> SeriesRegistry<K> {
    /// Names of series whose entries are not strictly ascending.
    pub fn unsorted(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|(_, s)| s.entries.windows(2).any(|w| w[0] >= w[1]))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl SeriesRegistry<SeriesKey> {
    /// Build a lookup key from raw text, matching the kind of key the named
    /// series stores. Unknown or empty series fall back to [`FromStr`].
    pub fn key_for(&self, name: &str, raw: &str) -> SeriesKey {
        match self.entries(name).and_then(|entries| entries.first()) {
            Some(like) => SeriesKey::parse_like(raw, like),
            None => SeriesKey::parse_loose(raw),
        }
    }
}

impl<K, N: Into<String>> FromIterator<(N, Vec<K>)> for SeriesRegistry<K> {
    fn from_iter<I: IntoIterator<Item = (N, Vec<K>)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, entries) in iter {
            registry.insert(name, entries);
        }
        registry
    }
}

/// Neighbors of a key within a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation<K> {
    pub prev: Option<K>,
    pub next: Option<K>,
}

/// Previous and next keys around `key` in the named series.
///
/// Returns `None` when the series is unknown or has no entries, meaning "no
/// navigation here". A present result can still have both sides empty (a
/// one-entry series).
pub fn resolve<K: Ord + Clone>(
    registry: &SeriesRegistry<K>,
    name: &str,
    key: &K,
) -> Option<Navigation<K>> {
    let entries = non_empty_entries(registry, name)?;
    let idx = entries.partition_point(|entry| entry < key);
    Some(around(entries, idx))
}

/// Like [`resolve`], but `None` unless `key` is an entry of the series.
pub fn resolve_exact<K: Ord + Clone>(
    registry: &SeriesRegistry<K>,
    name: &str,
    key: &K,
) -> Option<Navigation<K>> {
    let entries = non_empty_entries(registry, name)?;
    let idx = entries.binary_search(key).ok()?;
    Some(around(entries, idx))
}

fn non_empty_entries<'r, K>(registry: &'r SeriesRegistry<K>, name: &str) -> Option<&'r [K]> {
    match registry.entries(name) {
        Some(entries) if !entries.is_empty() => Some(entries),
        Some(_) => {
            tracing::debug!(series = name, "Series has no entries");
            None
        }
        None => {
            tracing::warn!(series = name, "Unknown series");
            None
        }
    }
}

fn around<K: Clone>(entries: &[K], idx: usize) -> Navigation<K> {
    Navigation {
        prev: idx.checked_sub(1).and_then(|i| entries.get(i)).cloned(),
        next: entries.get(idx + 1).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn nav(prev: Option<i64>, next: Option<i64>) -> Option<Navigation<i64>> {
        Some(Navigation { prev, next })
    }

    // =========================================================================
    // resolve
    // =========================================================================

    #[test]
    fn resolve_member_in_the_middle() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &3), nav(Some(1), Some(5)));
        assert_eq!(resolve(&reg, "s", &5), nav(Some(3), Some(7)));
    }

    #[test]
    fn resolve_first_member_has_no_prev() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &1), nav(None, Some(3)));
    }

    #[test]
    fn resolve_last_member_has_no_next() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &7), nav(Some(5), None));
    }

    #[test]
    fn resolve_non_member_takes_insertion_slot() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &4), nav(Some(3), Some(7)));
        assert_eq!(resolve(&reg, "s", &6), nav(Some(5), None));
    }

    #[test]
    fn resolve_key_below_all_entries() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &0), nav(None, Some(3)));
    }

    #[test]
    fn resolve_key_above_all_entries() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve(&reg, "s", &9), nav(Some(7), None));
    }

    #[test]
    fn resolve_single_entry_series() {
        let reg = int_registry(&[("s", &[42])]);
        assert_eq!(resolve(&reg, "s", &42), nav(None, None));
    }

    #[test]
    fn resolve_unknown_series_is_none() {
        let reg = int_registry(&[("s", &[1, 3])]);
        assert_eq!(resolve(&reg, "other", &1), None);
    }

    #[test]
    fn resolve_empty_series_is_none() {
        let reg = int_registry(&[("s", &[])]);
        assert_eq!(resolve(&reg, "s", &1), None);
    }

    #[test]
    fn resolve_string_keys() {
        let reg: SeriesRegistry<String> = [(
            "dates",
            vec!["2023-01-04".to_string(), "2023-02-11".into(), "2023-03-20".into()],
        )]
        .into_iter()
        .collect();
        let got = resolve(&reg, "dates", &"2023-02-11".to_string()).unwrap();
        assert_eq!(got.prev.as_deref(), Some("2023-01-04"));
        assert_eq!(got.next.as_deref(), Some("2023-03-20"));
    }

    #[test]
    fn resolve_large_series_matches_linear_scan() {
        let entries: Vec<i64> = (0..500).map(|n| n * 2).collect();
        let reg: SeriesRegistry<i64> = [("evens", entries.clone())].into_iter().collect();
        for key in -1..1001 {
            let idx = entries.iter().position(|e| *e >= key).unwrap_or(entries.len());
            let expected = Navigation {
                prev: idx.checked_sub(1).map(|i| entries[i]),
                next: entries.get(idx + 1).copied(),
            };
            assert_eq!(resolve(&reg, "evens", &key), Some(expected), "key {key}");
        }
    }

    #[test]
    fn resolve_unsorted_series_does_not_fail() {
        let reg = int_registry(&[("s", &[5, 1, 3])]);
        assert_eq!(resolve(&reg, "s", &3), nav(Some(1), None));
        assert!(resolve(&reg, "s", &0).is_some());
        assert!(resolve(&reg, "s", &9).is_some());
    }

    // =========================================================================
    // resolve_exact
    // =========================================================================

    #[test]
    fn resolve_exact_member() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve_exact(&reg, "s", &3), nav(Some(1), Some(5)));
        assert_eq!(resolve_exact(&reg, "s", &7), nav(Some(5), None));
    }

    #[test]
    fn resolve_exact_non_member_is_none() {
        let reg = int_registry(&[("s", &[1, 3, 5, 7])]);
        assert_eq!(resolve_exact(&reg, "s", &4), None);
        assert_eq!(resolve_exact(&reg, "s", &0), None);
    }

    #[test]
    fn resolve_exact_unknown_series_is_none() {
        let reg = int_registry(&[]);
        assert_eq!(resolve_exact(&reg, "s", &1), None);
    }

    // =========================================================================
    // Registry
    // =========================================================================

    #[test]
    fn unsorted_reports_out_of_order_and_duplicates() {
        let reg = int_registry(&[
            ("good", &[1, 2, 3]),
            ("backwards", &[3, 2, 1]),
            ("dupes", &[1, 1, 2]),
            ("empty", &[]),
        ]);
        assert_eq!(reg.unsorted(), vec!["backwards", "dupes"]);
    }

    #[test]
    fn summary_lists_entry_counts() {
        let reg = int_registry(&[("b", &[1, 2]), ("a", &[5])]);
        assert_eq!(reg.summary(), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn deserialize_site_data_layout() {
        let reg: SeriesRegistry<SeriesKey> = serde_json::from_str(
            r#"{
                "parts": { "entries": [1, 2, 3] },
                "dates": { "entries": ["2023-01-04", "2023-02-11"] },
                "pending": {}
            }"#,
        )
        .unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(
            reg.entries("parts"),
            Some(&[SeriesKey::Int(1), SeriesKey::Int(2), SeriesKey::Int(3)][..])
        );
        assert_eq!(reg.entries("pending"), Some(&[] as &[SeriesKey]));
        assert_eq!(resolve(&reg, "pending", &SeriesKey::Int(1)), None);
    }

    // =========================================================================
    // SeriesKey
    // =========================================================================

    #[test]
    fn series_key_parses_integers_and_text() {
        assert_eq!("12".parse::<SeriesKey>(), Ok(SeriesKey::Int(12)));
        assert_eq!("-3".parse::<SeriesKey>(), Ok(SeriesKey::Int(-3)));
        assert_eq!(
            "2023-01-04".parse::<SeriesKey>(),
            Ok(SeriesKey::Text("2023-01-04".into()))
        );
    }

    #[test]
    fn series_key_integers_sort_numerically() {
        assert!(SeriesKey::Int(9) < SeriesKey::Int(10));
        assert!(SeriesKey::Int(1000) < SeriesKey::Text("1".into()));
    }

    #[test]
    fn series_key_parses_floats() {
        assert_eq!("2.5".parse::<SeriesKey>(), Ok(SeriesKey::Float(2.5)));
        assert_eq!("nan".parse::<SeriesKey>(), Ok(SeriesKey::Text("nan".into())));
    }

    #[test]
    fn series_key_numbers_compare_across_kinds() {
        assert!(SeriesKey::Int(1) < SeriesKey::Float(1.5));
        assert!(SeriesKey::Float(1.5) < SeriesKey::Int(2));
        assert!(SeriesKey::Int(2) < SeriesKey::Float(2.0));
        assert_ne!(SeriesKey::Int(2), SeriesKey::Float(2.0));
        assert!(SeriesKey::Float(1e9) < SeriesKey::Text("0".into()));
    }

    #[test]
    fn resolve_float_series() {
        let reg: SeriesRegistry<SeriesKey> =
            serde_json::from_str(r#"{ "halves": { "entries": [0.5, 1.5, 2.5] } }"#).unwrap();
        let got = resolve(&reg, "halves", &SeriesKey::Float(1.5)).unwrap();
        assert_eq!(got.prev, Some(SeriesKey::Float(0.5)));
        assert_eq!(got.next, Some(SeriesKey::Float(2.5)));
    }

    // =========================================================================
    // key_for
    // =========================================================================

    fn mixed_registry() -> SeriesRegistry<SeriesKey> {
        serde_json::from_str(
            r#"{
                "parts": { "entries": ["001", "002", "003"] },
                "numbered": { "entries": [1, 2, 3] },
                "halves": { "entries": [0.5, 1.5] },
                "pending": {}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn key_for_text_series_keeps_digits_as_text() {
        let reg = mixed_registry();
        let key = reg.key_for("parts", "002");
        assert_eq!(key, SeriesKey::Text("002".into()));

        let got = resolve(&reg, "parts", &key).unwrap();
        assert_eq!(got.prev, Some(SeriesKey::from("001")));
        assert_eq!(got.next, Some(SeriesKey::from("003")));
        assert!(resolve_exact(&reg, "parts", &key).is_some());
    }

    #[test]
    fn key_for_integer_series_parses_integer() {
        let reg = mixed_registry();
        assert_eq!(reg.key_for("numbered", "02"), SeriesKey::Int(2));
        assert_eq!(reg.key_for("numbered", "two"), SeriesKey::Text("two".into()));
    }

    #[test]
    fn key_for_float_series_parses_float() {
        let reg = mixed_registry();
        assert_eq!(reg.key_for("halves", "1"), SeriesKey::Float(1.0));
    }

    #[test]
    fn key_for_unknown_or_empty_series_parses_loosely() {
        let reg = mixed_registry();
        assert_eq!(reg.key_for("missing", "7"), SeriesKey::Int(7));
        assert_eq!(reg.key_for("pending", "x"), SeriesKey::Text("x".into()));
    }

    #[test]
    fn series_key_display() {
        assert_eq!(SeriesKey::Int(7).to_string(), "7");
        assert_eq!(SeriesKey::from("part-two").to_string(), "part-two");
    }
}
