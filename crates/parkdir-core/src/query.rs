//! Filtering and sorting over the canonical record set.
//!
//! Pure derived views: inputs are never mutated, and every filter-state
//! change produces a fresh subset from the immutable canonical set.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::CanonicalRecord;

/// Price-text markers denoting monthly-rate or fee-cap language.
const MONTHLY_CAP_MARKERS: [&str; 3] = ["月租", "上限", "最高"];

/// Vehicle-type sub-predicate of a [`FilterCriteria`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VehicleFilter {
    #[default]
    Any,
    CarOnly,
    MotorcycleOnly,
    /// Requires the record to carry both the car and motorcycle markers.
    Both,
}

/// Immutable filter state, constructed by the UI shell and passed in.
/// The sub-predicates are independent and combined with logical AND.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against name + address. Empty
    /// matches everything.
    pub keyword: String,
    pub vehicle: VehicleFilter,
    /// Keep only records whose weekday and weekend prices are both
    /// present and differ.
    pub differential_pricing: bool,
    /// Keep only records whose price text mentions monthly-rate or
    /// fee-cap language.
    pub monthly_or_cap: bool,
}

impl FilterCriteria {
    /// Whether one record passes every active sub-predicate.
    #[must_use]
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if !keyword.is_empty() {
            let haystack = format!("{} {}", record.name, record.address).to_lowercase();
            if !haystack.contains(&keyword) {
                return false;
            }
        }

        let vehicle_ok = match self.vehicle {
            VehicleFilter::Any => true,
            VehicleFilter::CarOnly => record.has_car,
            VehicleFilter::MotorcycleOnly => record.has_motorcycle,
            VehicleFilter::Both => record.has_car && record.has_motorcycle,
        };
        if !vehicle_ok {
            return false;
        }

        if self.differential_pricing
            && (record.pricing_weekday.is_empty()
                || record.pricing_weekend.is_empty()
                || record.pricing_weekday == record.pricing_weekend)
        {
            return false;
        }

        if self.monthly_or_cap {
            let price_text = format!("{}{}", record.pricing_weekday, record.pricing_weekend);
            if !MONTHLY_CAP_MARKERS
                .iter()
                .any(|marker| price_text.contains(marker))
            {
                return false;
            }
        }

        true
    }
}

/// Sort order for a filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Collation of the display name.
    Name,
    /// Ascending first-number-in-text weekday price; records without a
    /// parseable number sort last.
    WeekdayPrice,
}

/// Returns the subset of `records` passing `criteria`, in input order.
#[must_use]
pub fn filter(records: &[CanonicalRecord], criteria: &FilterCriteria) -> Vec<CanonicalRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Sorts a filtered subset. Stable: records with equal keys keep their
/// pre-sort relative order.
#[must_use]
pub fn sort(mut records: Vec<CanonicalRecord>, order: SortOrder) -> Vec<CanonicalRecord> {
    match order {
        // Code-point comparison doubles as a deterministic radical-stroke
        // collation for the CJK ideograph block the data lives in.
        SortOrder::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
        // Decorate once per record; the comparator must not re-parse the
        // price text on every comparison.
        SortOrder::WeekdayPrice => {
            let mut keyed: Vec<(Option<f64>, CanonicalRecord)> = records
                .into_iter()
                .map(|record| (price_number(&record.pricing_weekday), record))
                .collect();
            keyed.sort_by(|a, b| compare_price_keys(a.0, b.0));
            return keyed.into_iter().map(|(_, record)| record).collect();
        }
    }
    records
}

/// Extracts the first decimal number from free-text price copy
/// (`"30元/小時"` yields `30.0`). `None` when the text has no number.
#[must_use]
pub fn price_number(text: &str) -> Option<f64> {
    static PRICE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PRICE_RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));
    re.find(text).and_then(|m| m.as_str().parse().ok())
}

fn compare_price_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        // Unpriced records sink to the end of an ascending sort.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_record;
    use serde_json::json;

    fn record(name: &str, weekday: &str, weekend: &str, vehicles: &str) -> CanonicalRecord {
        normalize_record(&json!({
            "name": name,
            "weekday_fee": weekday,
            "weekend_fee": weekend,
            "vehicle_types": vehicles,
        }))
    }

    // -------------------------------------------------------------------
    // filter
    // -------------------------------------------------------------------

    #[test]
    fn empty_criteria_match_everything() {
        let records = vec![record("甲停車場", "", "", ""), record("乙停車場", "", "", "")];
        assert_eq!(filter(&records, &FilterCriteria::default()).len(), 2);
    }

    #[test]
    fn keyword_matches_name_and_address_case_insensitively() {
        let mut a = record("Central Park 停車場", "", "", "");
        a.address = "高雄市新興區中山一路1號".to_string();
        let b = record("乙停車場", "", "", "");

        let by_name = FilterCriteria {
            keyword: "central".to_string(),
            ..FilterCriteria::default()
        };
        assert!(by_name.matches(&a));
        assert!(!by_name.matches(&b));

        let by_address = FilterCriteria {
            keyword: "中山一路".to_string(),
            ..FilterCriteria::default()
        };
        assert!(by_address.matches(&a));
    }

    #[test]
    fn both_vehicle_filter_requires_both_markers() {
        let both = record("甲", "", "", "汽車及機車");
        let car_only = record("乙", "", "", "汽車");
        let criteria = FilterCriteria {
            vehicle: VehicleFilter::Both,
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&both));
        assert!(!criteria.matches(&car_only));
    }

    #[test]
    fn differential_pricing_requires_two_differing_nonempty_prices() {
        let criteria = FilterCriteria {
            differential_pricing: true,
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record("甲", "30元", "40元", "")));
        assert!(!criteria.matches(&record("乙", "50元", "50元", "")));
        assert!(!criteria.matches(&record("丙", "30元", "", "")));
    }

    #[test]
    fn monthly_cap_filter_scans_both_price_texts() {
        let criteria = FilterCriteria {
            monthly_or_cap: true,
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record("甲", "30元，月租3000", "", "")));
        assert!(criteria.matches(&record("乙", "", "當日上限150元", "")));
        assert!(criteria.matches(&record("丙", "最高收費200元", "", "")));
        assert!(!criteria.matches(&record("丁", "30元/小時", "40元/小時", "")));
    }

    #[test]
    fn sub_predicate_order_does_not_change_the_subset() {
        let records = vec![
            record("中央汽車停車場", "30元", "30元", "汽車"),
            record("中央機車停車場", "20元", "20元", "機車"),
            record("河堤停車場", "30元", "30元", "汽車及機車"),
        ];
        let combined = FilterCriteria {
            keyword: "中央".to_string(),
            vehicle: VehicleFilter::CarOnly,
            ..FilterCriteria::default()
        };
        let keyword_only = FilterCriteria {
            keyword: "中央".to_string(),
            ..FilterCriteria::default()
        };
        let vehicle_only = FilterCriteria {
            vehicle: VehicleFilter::CarOnly,
            ..FilterCriteria::default()
        };

        let keyword_then_vehicle = filter(&filter(&records, &keyword_only), &vehicle_only);
        let vehicle_then_keyword = filter(&filter(&records, &vehicle_only), &keyword_only);
        let one_pass = filter(&records, &combined);

        assert_eq!(keyword_then_vehicle, one_pass);
        assert_eq!(vehicle_then_keyword, one_pass);
    }

    #[test]
    fn filter_preserves_input_order() {
        let records = vec![
            record("丙停車場", "", "", ""),
            record("甲停車場", "", "", ""),
            record("乙停車場", "", "", ""),
        ];
        let names: Vec<_> = filter(&records, &FilterCriteria::default())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["丙停車場", "甲停車場", "乙停車場"]);
    }

    // -------------------------------------------------------------------
    // sort
    // -------------------------------------------------------------------

    #[test]
    fn price_sort_puts_unpriced_records_last() {
        let records = vec![
            record("甲", "100", "", ""),
            record("乙", "", "", ""),
            record("丙", "50", "", ""),
        ];
        let sorted = sort(records, SortOrder::WeekdayPrice);
        let names: Vec<_> = sorted.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["丙", "甲", "乙"]);
    }

    #[test]
    fn price_sort_reads_first_number_in_free_text() {
        let records = vec![
            record("甲", "平日40元/小時", "", ""),
            record("乙", "計次30元，當日上限150元", "", ""),
        ];
        let sorted = sort(records, SortOrder::WeekdayPrice);
        assert_eq!(sorted[0].name, "乙");
    }

    #[test]
    fn price_sort_is_stable_for_equal_keys() {
        let mut first = record("甲", "30元", "", "");
        first.id = "first".to_string();
        let mut second = record("乙", "30元起", "", "");
        second.id = "second".to_string();
        let sorted = sort(vec![first, second], SortOrder::WeekdayPrice);
        assert_eq!(sorted[0].id, "first");
        assert_eq!(sorted[1].id, "second");
    }

    #[test]
    fn price_sort_orders_a_mixed_batch_with_one_parse_per_record() {
        // Equal keys (30) must keep input order while unpriced records
        // sink; the keys are extracted once per record up front.
        let mut records = vec![
            record("甲", "平日40元", "", ""),
            record("乙", "30元/小時", "", ""),
            record("丙", "免費", "", ""),
            record("丁", "30元起", "", ""),
            record("戊", "計次20元", "", ""),
        ];
        for (i, r) in records.iter_mut().enumerate() {
            r.id = i.to_string();
        }
        let sorted = sort(records, SortOrder::WeekdayPrice);
        let ids: Vec<_> = sorted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "3", "0", "2"]);
    }

    #[test]
    fn name_sort_orders_by_code_point() {
        // 乙 (U+4E59) precedes 甲 (U+7532) in the CJK block.
        let records = vec![
            record("甲停車場", "", "", ""),
            record("乙停車場", "", "", ""),
        ];
        let sorted = sort(records, SortOrder::Name);
        assert_eq!(sorted[0].name, "乙停車場");
    }

    #[test]
    fn price_number_extraction() {
        assert_eq!(price_number("30元/小時"), Some(30.0));
        assert_eq!(price_number("12.5元"), Some(12.5));
        assert_eq!(price_number("免費"), None);
        assert_eq!(price_number(""), None);
    }
}
