//! Ordered accumulation of matched call-site arguments.
//!
//! The accumulator is the only mutable state of a scan: every matched call
//! appends its formatted argument list under its signature, in visit order.
//! `finalize` produces the read-only [`UsageMap`] handed to exporters, with
//! an optional lexicographic re-sort of the signatures (occurrence order
//! within a signature is never reordered).

use indexmap::IndexMap;
use serde::Serialize;

/// The formatted arguments of one call occurrence, in call-site order.
pub type ArgumentList = Vec<String>;

/// Append-only builder for the scan result.
///
/// No deduplication: identical call sites with identical arguments are
/// recorded once per occurrence.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    entries: IndexMap<String, Vec<ArgumentList>>,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one call occurrence under `signature`, creating the entry on
    /// first sight.
    pub fn record(&mut self, signature: impl Into<String>, arguments: ArgumentList) {
        self.entries
            .entry(signature.into())
            .or_default()
            .push(arguments);
    }

    /// Append all of `other`'s occurrences, preserving both orders.
    ///
    /// Used by the driver to merge per-file accumulators in deterministic
    /// file order.
    pub fn merge(&mut self, other: UsageAccumulator) {
        for (signature, lists) in other.entries {
            self.entries.entry(signature).or_default().extend(lists);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the accumulated structure, optionally sorting signatures
    /// lexicographically.
    pub fn finalize(mut self, sort_by_key: bool) -> UsageMap {
        if sort_by_key {
            self.entries.sort_keys();
        }
        UsageMap {
            entries: self.entries,
        }
    }
}

/// The finalized scan result: signature → argument lists, one per
/// occurrence.
///
/// Iteration order is insertion order (or lexicographic after a sorted
/// `finalize`), and serialization preserves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UsageMap {
    entries: IndexMap<String, Vec<ArgumentList>>,
}

impl UsageMap {
    /// Iterate signatures with their occurrences, in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArgumentList])> {
        self.entries
            .iter()
            .map(|(signature, lists)| (signature.as_str(), lists.as_slice()))
    }

    /// The occurrences recorded for a signature.
    pub fn get(&self, signature: &str) -> Option<&[ArgumentList]> {
        self.entries.get(signature).map(Vec::as_slice)
    }

    /// Signatures in map order.
    pub fn signatures(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded call occurrences across all signatures.
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(values: &[&str]) -> ArgumentList {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut acc = UsageAccumulator::new();
        acc.record("b::x", args(&["1"]));
        acc.record("a::y", args(&["2"]));
        acc.record("b::x", args(&["3"]));

        let map = acc.finalize(false);
        let signatures: Vec<&str> = map.signatures().collect();
        assert_eq!(signatures, vec!["b::x", "a::y"]);
        assert_eq!(map.get("b::x").unwrap(), &[args(&["1"]), args(&["3"])]);
    }

    #[test]
    fn test_occurrences_keep_visit_order_within_key() {
        let mut acc = UsageAccumulator::new();
        acc.record("logger->info", args(&["first"]));
        acc.record("logger->info", args(&["second"]));
        acc.record("logger->info", args(&["third"]));

        let map = acc.finalize(false);
        assert_eq!(
            map.get("logger->info").unwrap(),
            &[args(&["first"]), args(&["second"]), args(&["third"])]
        );
    }

    #[test]
    fn test_sort_by_key_orders_signatures_only() {
        let mut acc = UsageAccumulator::new();
        acc.record("c->z", args(&["z2"]));
        acc.record("a->x", args(&["x1"]));
        acc.record("c->z", args(&["z1"]));

        let map = acc.finalize(true);
        let signatures: Vec<&str> = map.signatures().collect();
        assert_eq!(signatures, vec!["a->x", "c->z"]);
        // Within-key occurrence order is untouched by the sort.
        assert_eq!(map.get("c->z").unwrap(), &[args(&["z2"]), args(&["z1"])]);
    }

    #[test]
    fn test_no_deduplication() {
        let mut acc = UsageAccumulator::new();
        acc.record("a->x", args(&["same"]));
        acc.record("a->x", args(&["same"]));

        let map = acc.finalize(false);
        assert_eq!(map.occurrence_count(), 2);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = UsageAccumulator::new();
        first.record("a->x", args(&["1"]));

        let mut second = UsageAccumulator::new();
        second.record("a->x", args(&["2"]));
        second.record("b->y", args(&["3"]));

        first.merge(second);
        let map = first.finalize(false);
        assert_eq!(map.get("a->x").unwrap(), &[args(&["1"]), args(&["2"])]);
        assert_eq!(map.signatures().collect::<Vec<_>>(), vec!["a->x", "b->y"]);
    }

    #[test]
    fn test_serialization_preserves_order() {
        let mut acc = UsageAccumulator::new();
        acc.record("z::last", args(&["1"]));
        acc.record("a::first", args(&["2"]));

        let json = serde_json::to_string(&acc.finalize(false)).unwrap();
        assert_eq!(json, r#"{"z::last":[["1"]],"a::first":[["2"]]}"#);
    }
}
