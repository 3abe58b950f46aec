//! Domain types for the parking-lot directory pipeline.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

/// A fully normalized, display-ready parking-lot listing.
///
/// Serialization intentionally uses the curated/flat feed field names
/// (`weekday_fee`, `vehicle_types`, ...), so a serialized canonical record
/// is itself a valid curated-variant input to
/// [`crate::normalize::normalize_record`]. Re-normalizing a canonical
/// record yields an equivalent record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// Feed-supplied ID when present, else `"{name}-{address}"`.
    pub id: String,
    /// Display name. Never empty; sparse records get a placeholder.
    pub name: String,
    /// Free-text street address. May be empty.
    pub address: String,
    /// Administrative district label. Never empty; records whose address
    /// yields no match carry the `其他` sentinel.
    pub district: String,
    /// Raw vehicle-type text as supplied by the feed.
    #[serde(rename = "vehicle_types")]
    pub vehicle_text: String,
    pub has_car: bool,
    pub has_motorcycle: bool,
    /// Display tags: the split tokens of a delimiter-separated vehicle
    /// list, or the raw text as a single tag when it matched neither
    /// fixed marker, or empty when the feed said nothing.
    pub vehicle_labels: Vec<String>,
    /// Free-text weekday pricing. May be empty.
    #[serde(rename = "weekday_fee")]
    pub pricing_weekday: String,
    /// Free-text weekend/holiday pricing. May be empty.
    #[serde(rename = "weekend_fee")]
    pub pricing_weekend: String,
    pub google_rating: Option<f64>,
    pub google_review_count: Option<i64>,
    /// Record-supplied maps URL. May be empty; see [`Self::maps_link`].
    pub google_maps_url: String,
    /// Resolved thumbnail URL. Empty means the caller renders a
    /// placeholder.
    pub thumbnail_url: String,
    /// Provenance date of an applied rating override, when one matched.
    pub google_as_of: Option<String>,
}

impl CanonicalRecord {
    /// True when the feed named neither of the fixed vehicle markers.
    #[must_use]
    pub fn vehicle_unspecified(&self) -> bool {
        !self.has_car && !self.has_motorcycle
    }

    /// The link target for opening this listing in Google Maps: the
    /// record-supplied URL when present, else a deterministic search link
    /// built from name + address.
    #[must_use]
    pub fn maps_link(&self) -> String {
        if !self.google_maps_url.is_empty() {
            return self.google_maps_url.clone();
        }
        let query = format!("{} {}", self.name, self.address);
        let encoded = utf8_percent_encode(query.trim(), NON_ALPHANUMERIC);
        format!("https://www.google.com/maps/search/?api=1&query={encoded}")
    }
}

/// One district partition of a query result, in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictGroup {
    pub district: String,
    pub records: Vec<CanonicalRecord>,
}
