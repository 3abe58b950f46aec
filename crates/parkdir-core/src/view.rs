//! Render-facing view model.
//!
//! The UI shell passes in the immutable canonical set plus the current
//! filter state and gets back everything it needs to paint: counts and
//! district-grouped records. The core never reads ambient state and
//! never mutates the canonical set.

use serde::Serialize;

use crate::group::group_by_district;
use crate::query::{self, FilterCriteria, SortOrder};
use crate::types::{CanonicalRecord, DistrictGroup};

/// One fully derived presentation of the canonical set under a filter
/// state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    /// Size of the whole canonical set.
    pub total_count: usize,
    /// Records passing the active filter.
    pub filtered_count: usize,
    pub groups: Vec<DistrictGroup>,
}

/// Runs one filter → sort → group pass over the canonical set.
#[must_use]
pub fn build_view(
    records: &[CanonicalRecord],
    criteria: &FilterCriteria,
    order: SortOrder,
) -> DirectoryView {
    let filtered = query::sort(query::filter(records, criteria), order);
    DirectoryView {
        total_count: records.len(),
        filtered_count: filtered.len(),
        groups: group_by_district(filtered),
    }
}
