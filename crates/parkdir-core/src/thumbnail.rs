//! Thumbnail resolution across the observed photo-source representations.

use serde_json::Value;

/// Placeholder token in the classic photo-reference URL template.
const PHOTO_REFERENCE_TOKEN: &str = "PHOTO_REFERENCE";
/// Placeholder token in the new photo-resource URL template.
const PHOTO_RESOURCE_TOKEN: &str = "PHOTO_RESOURCE_NAME";

/// Every photo-source representation a raw record may carry, gathered
/// once so [`ThumbnailSources::resolve`] can apply a single priority
/// chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSources {
    /// Direct photo URL, ready to render.
    pub url: String,
    /// Classic Places API photo reference token.
    pub photo_reference: String,
    /// New Places API photo resource name.
    pub photo_resource_name: String,
    /// URL template expecting the `PHOTO_REFERENCE` placeholder.
    pub classic_template: String,
    /// URL template expecting the `PHOTO_RESOURCE_NAME` placeholder.
    pub new_template: String,
    /// Street View static image fallback.
    pub street_view_url: String,
}

impl ThumbnailSources {
    /// Gathers photo sources from a raw record of either feed shape.
    ///
    /// Schema-variant records nest everything under `thumbnail`
    /// (`place_photo`, `street_view`, and a `templates` map that may also
    /// sit on the thumbnail object or the record root); curated records
    /// carry at most a flat `thumbnail_url`.
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        let thumbnail = raw.get("thumbnail").filter(|v| v.is_object());
        let place_photo = thumbnail
            .and_then(|t| t.get("place_photo"))
            .filter(|v| v.is_object());
        let street_view = thumbnail
            .and_then(|t| t.get("street_view"))
            .filter(|v| v.is_object());
        let templates = place_photo
            .and_then(|p| p.get("templates"))
            .or_else(|| thumbnail.and_then(|t| t.get("templates")))
            .or_else(|| raw.get("templates"))
            .filter(|v| v.is_object());

        Self {
            url: str_of(place_photo, "url")
                .or_else(|| raw.get("thumbnail_url").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_default(),
            photo_reference: str_of(place_photo, "photo_reference").unwrap_or_default(),
            photo_resource_name: str_of(place_photo, "photo_resource_name").unwrap_or_default(),
            classic_template: str_of(templates, "classic_photoreference_url_template")
                .unwrap_or_default(),
            new_template: str_of(templates, "new_photo_resource_url_template")
                .unwrap_or_default(),
            street_view_url: str_of(street_view, "url").unwrap_or_default(),
        }
    }

    /// Resolves the single displayable image URL, first non-empty wins:
    /// direct URL, classic template + reference, new template + resource
    /// name, street view, else empty (caller renders a placeholder).
    ///
    /// Template tokens are substituted exactly once.
    #[must_use]
    pub fn resolve(&self) -> String {
        if !self.url.is_empty() {
            return self.url.clone();
        }
        if !self.photo_reference.is_empty() && !self.classic_template.is_empty() {
            return self
                .classic_template
                .replacen(PHOTO_REFERENCE_TOKEN, &self.photo_reference, 1);
        }
        if !self.photo_resource_name.is_empty() && !self.new_template.is_empty() {
            return self
                .new_template
                .replacen(PHOTO_RESOURCE_TOKEN, &self.photo_resource_name, 1);
        }
        if !self.street_view_url.is_empty() {
            return self.street_view_url.clone();
        }
        String::new()
    }
}

fn str_of(object: Option<&Value>, key: &str) -> Option<String> {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}
