//! District grouping of query results.

use std::collections::BTreeMap;

use crate::types::{CanonicalRecord, DistrictGroup};

/// Partitions an ordered record sequence by district.
///
/// Within-group order is exactly the input order (the query engine has
/// already sorted it); groups come out ordered by district label, the
/// same code-point collation the name sort uses.
#[must_use]
pub fn group_by_district(records: Vec<CanonicalRecord>) -> Vec<DistrictGroup> {
    let mut groups: BTreeMap<String, Vec<CanonicalRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.district.clone())
            .or_default()
            .push(record);
    }
    groups
        .into_iter()
        .map(|(district, records)| DistrictGroup { district, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::group_by_district;
    use crate::normalize::normalize_record;
    use serde_json::json;

    fn record(name: &str, district: &str) -> crate::types::CanonicalRecord {
        normalize_record(&json!({ "name": name, "district": district }))
    }

    #[test]
    fn partitions_by_district_and_orders_group_labels() {
        let grouped = group_by_district(vec![
            record("甲", "苓雅區"),
            record("乙", "三民區"),
            record("丙", "苓雅區"),
        ]);
        let labels: Vec<_> = grouped.iter().map(|g| g.district.as_str()).collect();
        // 三 (U+4E09) precedes 苓 (U+82D3).
        assert_eq!(labels, vec!["三民區", "苓雅區"]);
    }

    #[test]
    fn preserves_within_group_input_order() {
        let grouped = group_by_district(vec![
            record("丙", "苓雅區"),
            record("甲", "苓雅區"),
            record("乙", "苓雅區"),
        ]);
        let names: Vec<_> = grouped[0].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["丙", "甲", "乙"]);
    }

    #[test]
    fn sentinel_district_forms_its_own_group() {
        let grouped = group_by_district(vec![record("甲", "其他"), record("乙", "三民區")]);
        assert!(grouped.iter().any(|g| g.district == "其他"));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_district(vec![]).is_empty());
    }
}
