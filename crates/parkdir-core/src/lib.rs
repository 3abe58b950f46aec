//! Normalization, reconciliation, and query pipeline for a directory of
//! parking-lot listings sourced from heterogeneous JSON feeds.
//!
//! The pipeline is: raw feed records (either of two observed shapes) →
//! [`normalize::normalize_record`] → [`overrides::OverrideIndex`]
//! patching → [`query`] filter/sort → [`group`] district partition →
//! [`view::DirectoryView`] for the rendering shell. Everything here is
//! pure and synchronous; feed I/O lives in the `parkdir-feed` crate.

pub mod district;
pub mod group;
pub mod normalize;
pub mod overrides;
pub mod query;
pub mod thumbnail;
pub mod types;
pub mod view;

pub use district::{extract_district, DISTRICT_OTHER};
pub use group::group_by_district;
pub use normalize::{normalize_record, RawVariant, UNNAMED_PLACEHOLDER};
pub use overrides::{OverrideEntry, OverrideIndex, OverrideReport};
pub use query::{filter, sort, FilterCriteria, SortOrder, VehicleFilter};
pub use thumbnail::ThumbnailSources;
pub use types::{CanonicalRecord, DistrictGroup};
pub use view::{build_view, DirectoryView};
