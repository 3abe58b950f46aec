//! I/O boundary for the parking-lot directory: fetches the listing feed
//! through an ordered fallback chain and the rating override feed as an
//! independent, silently-degrading load, then hands `parkdir-core` both
//! halves for normalization and reconciliation.

pub mod client;
pub mod error;
pub mod load;

pub use client::FeedClient;
pub use error::FeedError;
pub use load::{load_directory, load_overrides, load_records, FeedPayload, LoadedDirectory};
