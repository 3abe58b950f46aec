//! Rating/review override reconciliation.
//!
//! A secondary, independently maintained feed maps listing names to
//! Google rating data collected out-of-band. Names in that feed are
//! human-entered, so matching is exact-first with a relaxed fallback:
//! the relaxed key strips all whitespace and the facility-type suffix.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::CanonicalRecord;

/// Facility-type suffix stripped when building relaxed keys.
const FACILITY_SUFFIX: &str = "停車場";

/// One override feed entry. All payload fields are optional; a matched
/// entry only patches the fields it actually supplies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverrideEntry {
    pub google_rating: Option<f64>,
    pub google_review_count: Option<i64>,
    /// Places API ID recorded by the override generator. Provenance
    /// only; never written onto records.
    pub place_id: Option<String>,
    pub as_of: Option<String>,
}

/// Lookup structures built once per override feed load.
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex {
    exact: HashMap<String, OverrideEntry>,
    relaxed: HashMap<String, OverrideEntry>,
}

/// Diagnostics from an [`OverrideIndex::apply_all`] pass. Observability
/// output only — unmatched records are not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideReport {
    /// Records that received an override.
    pub matched: usize,
    /// Names of records no override entry covered.
    pub unmatched: Vec<String>,
}

impl OverrideIndex {
    /// Builds the exact and relaxed maps from a parsed override feed.
    ///
    /// Keys are trimmed and empty keys skipped. On relaxed-key collision
    /// the first entry encountered wins; the feed is a JSON object with
    /// no order guarantee, so duplicate priority is undefined by design.
    /// Malformed entries are skipped, and a non-object feed yields an
    /// empty index — override data degrades, it never fails the load.
    #[must_use]
    pub fn build(feed: &Value) -> Self {
        let Some(entries) = feed.as_object() else {
            if !feed.is_null() {
                tracing::warn!("override feed was not a JSON object; ignoring");
            }
            return Self::default();
        };

        let mut index = Self::default();
        for (key, value) in entries {
            let name = key.trim();
            if name.is_empty() {
                continue;
            }
            let entry: OverrideEntry = match serde_json::from_value(value.clone()) {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::debug!(name, %error, "skipping malformed override entry");
                    continue;
                }
            };

            let relaxed = relaxed_key(name);
            if !relaxed.is_empty() {
                index.relaxed.entry(relaxed).or_insert_with(|| entry.clone());
            }
            index.exact.insert(name.to_string(), entry);
        }
        index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Looks up the record's name, exact before relaxed.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&OverrideEntry> {
        if let Some(entry) = self.exact.get(name.trim()) {
            return Some(entry);
        }
        let relaxed = relaxed_key(name);
        if relaxed.is_empty() {
            return None;
        }
        self.relaxed.get(&relaxed)
    }

    /// Patches one record from its matching override entry, if any.
    ///
    /// Only `google_rating`, `google_review_count`, and `google_as_of`
    /// are ever touched, and only where the entry supplies a value.
    /// Unmatched records come back unchanged.
    #[must_use]
    pub fn resolve(&self, record: &CanonicalRecord) -> (CanonicalRecord, bool) {
        let Some(entry) = self.lookup(&record.name) else {
            return (record.clone(), false);
        };

        let mut patched = record.clone();
        if entry.google_rating.is_some() {
            patched.google_rating = entry.google_rating;
        }
        if entry.google_review_count.is_some() {
            patched.google_review_count = entry.google_review_count;
        }
        if entry.as_of.is_some() {
            patched.google_as_of = entry.as_of.clone();
        }
        (patched, true)
    }

    /// Resolves a whole batch, collecting match diagnostics.
    ///
    /// With an empty index (no override feed loaded) the records pass
    /// through untouched and no unmatched names are reported — there was
    /// nothing to match against.
    #[must_use]
    pub fn apply_all(&self, records: Vec<CanonicalRecord>) -> (Vec<CanonicalRecord>, OverrideReport) {
        if self.is_empty() {
            return (records, OverrideReport::default());
        }

        let mut report = OverrideReport::default();
        let patched = records
            .into_iter()
            .map(|record| {
                let (record, matched) = self.resolve(&record);
                if matched {
                    report.matched += 1;
                } else {
                    report.unmatched.push(record.name.clone());
                }
                record
            })
            .collect();

        if !report.unmatched.is_empty() {
            tracing::debug!(
                matched = report.matched,
                unmatched = report.unmatched.len(),
                "override resolution left records unmatched"
            );
        }
        (patched, report)
    }
}

/// Strips all whitespace, then the facility-type suffix.
fn relaxed_key(name: &str) -> String {
    let compact: String = name.split_whitespace().collect();
    compact
        .strip_suffix(FACILITY_SUFFIX)
        .unwrap_or(&compact)
        .to_string()
}
