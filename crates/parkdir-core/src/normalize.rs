//! Normalization from raw, shape-ambiguous feed records to
//! [`CanonicalRecord`].
//!
//! ## Observed feed shapes
//!
//! The listing feeds are hand-maintained and have drifted into two
//! shapes:
//!
//! - **Schema variant**: nested `pricing` / `thumbnail` / `google`
//!   sub-objects (`pricing.weekday`, `google.rating`, ...).
//! - **Curated variant**: flat records with suffixed field names
//!   (`weekday_fee`, `google_rating`, `address_text`, ...), no nested
//!   objects.
//!
//! Nothing tags the shape; it is inferred once from field presence and
//! each field is then resolved through a priority chain: schema-variant
//! name first, curated alias next, generic fallback, literal default
//! last. Normalization is total — a malformed or sparse record yields a
//! renderable placeholder record, never an error.

use serde_json::Value;

use crate::district::extract_district;
use crate::thumbnail::ThumbnailSources;
use crate::types::CanonicalRecord;

/// Display name assigned to records whose feeds carry no usable name.
pub const UNNAMED_PLACEHOLDER: &str = "未命名停車場";

/// Fixed substring marking car access in free vehicle-type text.
const CAR_MARKER: &str = "汽車";
/// Fixed substring marking motorcycle/scooter access.
const MOTORCYCLE_MARKER: &str = "機車";
/// Separators seen in list-style vehicle-type fields, half- and
/// full-width.
const VEHICLE_DELIMITERS: [char; 5] = [',', '，', '、', '/', '／'];

/// Which of the two observed raw shapes a record uses.
///
/// Decided exactly once at normalization entry; the rest of the pipeline
/// only ever sees [`CanonicalRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawVariant {
    /// Nested `pricing` / `thumbnail` / `google` sub-objects.
    Schema,
    /// Flat record with suffixed field names.
    Curated,
}

impl RawVariant {
    /// Infers the variant from field presence: any nested sub-object
    /// marks the record as schema-shaped.
    #[must_use]
    pub fn detect(raw: &Value) -> Self {
        let nested = ["pricing", "thumbnail", "google"];
        if nested
            .iter()
            .any(|key| raw.get(key).is_some_and(Value::is_object))
        {
            Self::Schema
        } else {
            Self::Curated
        }
    }
}

/// Normalizes one raw record of either shape into a [`CanonicalRecord`].
///
/// Total: every field has a default, so one bad record never aborts a
/// batch. The returned record always has a non-empty `name` and a
/// defined `district`.
#[must_use]
pub fn normalize_record(raw: &Value) -> CanonicalRecord {
    let variant = RawVariant::detect(raw);
    let (pricing, google) = match variant {
        RawVariant::Schema => (
            raw.get("pricing").filter(|v| v.is_object()),
            raw.get("google").filter(|v| v.is_object()),
        ),
        RawVariant::Curated => (None, None),
    };

    let name = string_chain(&[raw.get("parking_name"), raw.get("name")])
        .unwrap_or_else(|| UNNAMED_PLACEHOLDER.to_string());
    let address =
        string_chain(&[raw.get("address"), raw.get("address_text")]).unwrap_or_default();
    let district = string_chain(&[raw.get("district")])
        .unwrap_or_else(|| extract_district(&address));

    let vehicle_text = string_chain(&[raw.get("vehicle_types"), raw.get("vehicleType")])
        .unwrap_or_default();
    let has_car = vehicle_text.contains(CAR_MARKER);
    let has_motorcycle = vehicle_text.contains(MOTORCYCLE_MARKER);
    let vehicle_labels = vehicle_labels(&vehicle_text, has_car, has_motorcycle);

    let id = raw
        .get("id")
        .and_then(|v| v.as_str().map(str::to_string).or_else(|| Some(v.to_string())))
        .filter(|s| !s.is_empty() && s != "null")
        .unwrap_or_else(|| format!("{name}-{address}"));

    CanonicalRecord {
        id,
        name,
        address,
        district,
        vehicle_text,
        has_car,
        has_motorcycle,
        vehicle_labels,
        pricing_weekday: string_chain(&[
            pricing.and_then(|p| p.get("weekday")),
            pricing.and_then(|p| p.get("weekday_fee")),
            raw.get("weekday_fee"),
        ])
        .unwrap_or_default(),
        pricing_weekend: string_chain(&[
            pricing.and_then(|p| p.get("weekend")),
            pricing.and_then(|p| p.get("weekend_fee")),
            raw.get("weekend_fee"),
        ])
        .unwrap_or_default(),
        google_rating: number_chain(&[
            google.and_then(|g| g.get("rating")),
            raw.get("google_rating"),
        ]),
        google_review_count: integer_chain(&[
            google.and_then(|g| g.get("review_count")),
            raw.get("google_review_count"),
        ]),
        google_maps_url: string_chain(&[
            google.and_then(|g| g.get("maps_url")),
            google.and_then(|g| g.get("url")),
            raw.get("google_maps_url"),
        ])
        .unwrap_or_default(),
        thumbnail_url: ThumbnailSources::from_raw(raw).resolve(),
        google_as_of: string_chain(&[
            google.and_then(|g| g.get("as_of")),
            raw.get("google_as_of"),
        ]),
    }
}

/// Display tags for the vehicle-type field.
///
/// Delimiter-separated lists are split and trimmed; plain free text that
/// matched neither fixed marker is kept whole as a single tag (the
/// renderer shows it verbatim); otherwise the matched markers themselves
/// are the tags.
fn vehicle_labels(text: &str, has_car: bool, has_motorcycle: bool) -> Vec<String> {
    if text.contains(VEHICLE_DELIMITERS) {
        return text
            .split(VEHICLE_DELIMITERS)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
    }

    let mut labels = Vec::new();
    if has_car {
        labels.push(CAR_MARKER.to_string());
    }
    if has_motorcycle {
        labels.push(MOTORCYCLE_MARKER.to_string());
    }
    if labels.is_empty() && !text.trim().is_empty() {
        labels.push(text.trim().to_string());
    }
    labels
}

/// First non-empty string value in the chain, trimmed. Trimmed-empty
/// values are treated as absent.
fn string_chain(candidates: &[Option<&Value>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First numeric value in the chain; numeric strings are accepted
/// because some curated exports quote their numbers.
fn number_chain(candidates: &[Option<&Value>]) -> Option<f64> {
    candidates.iter().flatten().find_map(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

/// First integer value in the chain, with the same quoted-number
/// tolerance as [`number_chain`].
fn integer_chain(candidates: &[Option<&Value>]) -> Option<i64> {
    candidates.iter().flatten().find_map(|v| {
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
