//! District extraction from free-text addresses.

use regex::Regex;

/// Sentinel district for addresses with no recognizable district token.
pub const DISTRICT_OTHER: &str = "其他";

/// Extracts an administrative-district label from an address.
///
/// Prefers a token anchored directly after the city name (`高雄市苓雅區...`
/// yields `苓雅區`), falling back to a two-character-plus-suffix match
/// anywhere in the address. The captured token is capped at three
/// characters before the `區` suffix so street names cannot bleed into
/// the label. No match yields [`DISTRICT_OTHER`].
#[must_use]
pub fn extract_district(address: &str) -> String {
    if address.is_empty() {
        return DISTRICT_OTHER.to_string();
    }

    // Lazy quantifier: the shortest run after the city anchor is the
    // district itself (most are two characters, 那瑪夏區 needs three).
    let after_city = Regex::new(r"市([^\s,，、市]{1,3}?區)").expect("valid regex");
    if let Some(cap) = after_city.captures(address) {
        return cap[1].to_string();
    }

    let anywhere = Regex::new(r"([^\s,，、市區]{2}區)").expect("valid regex");
    if let Some(cap) = anywhere.captures(address) {
        return cap[1].to_string();
    }

    DISTRICT_OTHER.to_string()
}
