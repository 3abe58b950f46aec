//! Feed loading: the sequential primary/fallback chain, the
//! silently-degrading override load, and the pipeline that joins both.

use parkdir_core::{normalize_record, CanonicalRecord, OverrideIndex, OverrideReport};
use serde_json::Value;

use crate::client::FeedClient;
use crate::error::FeedError;

/// Raw payload of the first listing source that succeeded.
#[derive(Debug)]
pub struct FeedPayload {
    pub records: Vec<Value>,
    /// URL of the winning source, kept for status display.
    pub source: String,
}

/// Fully loaded, normalized, override-patched directory.
#[derive(Debug)]
pub struct LoadedDirectory {
    pub records: Vec<CanonicalRecord>,
    /// URL of the listing source that served the data.
    pub source: String,
    pub override_report: OverrideReport,
}

/// Loads the listing feed through a strict sequential fallback chain.
///
/// Sources are attempted in order; an attempt only starts after the
/// previous one failed, and the first success short-circuits the rest.
///
/// # Errors
///
/// Returns [`FeedError::AllSourcesFailed`] once every source has
/// failed. Per-source failures are logged, not surfaced.
pub async fn load_records(
    client: &FeedClient,
    sources: &[String],
) -> Result<FeedPayload, FeedError> {
    for (index, source) in sources.iter().enumerate() {
        match client.fetch_json(source).await {
            Ok(payload) => {
                tracing::debug!(%source, index, "listing feed loaded");
                return Ok(FeedPayload {
                    records: unwrap_records(payload),
                    source: source.clone(),
                });
            }
            Err(error) => {
                tracing::warn!(%source, index, %error, "listing source failed; trying next");
            }
        }
    }
    Err(FeedError::AllSourcesFailed {
        attempted: sources.len(),
    })
}

/// Loads and indexes the override feed. No fallback: absence, fetch
/// failure, and parse failure all degrade to an empty index.
pub async fn load_overrides(client: &FeedClient, url: Option<&str>) -> OverrideIndex {
    let Some(url) = url else {
        return OverrideIndex::default();
    };
    match client.fetch_json(url).await {
        Ok(feed) => OverrideIndex::build(&feed),
        Err(error) => {
            tracing::warn!(url, %error, "override feed unavailable; proceeding without overrides");
            OverrideIndex::default()
        }
    }
}

/// Loads both feeds concurrently, then normalizes and patches.
///
/// Normalization is total, so a malformed record in the payload becomes
/// a placeholder entry rather than aborting the batch.
///
/// # Errors
///
/// Returns [`FeedError::AllSourcesFailed`] when the listing chain is
/// exhausted; an override failure is never an error.
pub async fn load_directory(
    client: &FeedClient,
    sources: &[String],
    overrides_url: Option<&str>,
) -> Result<LoadedDirectory, FeedError> {
    let (payload, index) = tokio::join!(
        load_records(client, sources),
        load_overrides(client, overrides_url)
    );
    let payload = payload?;

    let canonical: Vec<CanonicalRecord> = payload.records.iter().map(normalize_record).collect();
    let (records, override_report) = index.apply_all(canonical);

    Ok(LoadedDirectory {
        records,
        source: payload.source,
        override_report,
    })
}

/// Accepts both published payload shapes: a bare record array, or a
/// wrapper object with the array under `items` or `data`.
fn unwrap_records(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut wrapper) => ["items", "data"]
            .iter()
            .find_map(|key| match wrapper.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
