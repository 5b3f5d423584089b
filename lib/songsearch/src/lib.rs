pub mod aggregate;
pub mod catalog;
pub mod error;
mod http;
pub mod lyrics;
pub mod ranking;
pub mod services;
pub mod traits;

pub use catalog::{CatalogProvider, CatalogProviderBuilder};
pub use http::DEFAULT_TIMEOUT_SECS;
pub use lyrics::{LyricsProvider, LyricsProviderBuilder};
pub use services::{SearchService, SearchServiceBuilder};
pub use traits::{SnapshotStore, TrackProvider};
