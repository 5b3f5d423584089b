use async_trait::async_trait;
use shared::{
    search::SearchQuery,
    track::{Origin, Track},
};

use crate::error::{Result, StorageError};

/// An external source of track metadata.
#[async_trait]
pub trait TrackProvider: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    /// The tag stamped on every track this provider returns.
    fn origin(&self) -> Origin;

    /// Issues one outbound query and returns the normalized tracks.
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Track>>;
}

/// Durable home of the most recent search's results.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Drops the previous snapshot, persists `tracks` in order and returns
    /// what the store now holds. Returned ids are store-assigned.
    async fn replace_and_reload(&self, tracks: &[Track]) -> Result<Vec<Track>, StorageError>;
}
