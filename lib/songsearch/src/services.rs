use std::sync::Arc;

use shared::{
    search::{SearchQuery, SearchResult},
    track::Track,
};
use tracing::{error, info, warn};

use crate::{
    aggregate,
    error::{ProviderError, SearchError},
    ranking, SnapshotStore, TrackProvider,
};

/// Runs one search end to end: fan out to both providers, merge, rank,
/// persist as the new snapshot and return what the store holds.
pub struct SearchService {
    catalog: Arc<dyn TrackProvider>,
    lyrics: Arc<dyn TrackProvider>,
    store: Arc<dyn SnapshotStore>,
}

impl SearchService {
    pub fn builder() -> SearchServiceBuilder {
        SearchServiceBuilder::new()
    }

    pub async fn handle(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        info!(
            "Starting search for name: '{}', artist: '{}', album: '{}'",
            query.name, query.artist, query.album
        );

        let (catalog, lyrics) = self.fetch_all(query).await;
        let candidates = aggregate::combine(catalog, lyrics, query);
        let ranked = ranking::rank(candidates, query);

        let stored = self.store.replace_and_reload(&ranked).await.map_err(|e| {
            error!("Failed to persist search snapshot: {}", e);
            e
        })?;

        info!("Search finished with {} tracks", stored.len());
        Ok(SearchResult::from_tracks(stored))
    }

    /// Queries both providers on their own tasks and waits for both.
    /// A failed provider contributes nothing.
    async fn fetch_all(&self, query: &SearchQuery) -> (Vec<Track>, Vec<Track>) {
        let catalog = spawn_fetch(Arc::clone(&self.catalog), query.clone());
        let lyrics = spawn_fetch(Arc::clone(&self.lyrics), query.clone());

        let (catalog, lyrics) = tokio::join!(catalog, lyrics);
        (
            or_empty(self.catalog.as_ref(), join_result(catalog)),
            or_empty(self.lyrics.as_ref(), join_result(lyrics)),
        )
    }
}

type FetchHandle = tokio::task::JoinHandle<Result<Vec<Track>, ProviderError>>;

fn spawn_fetch(provider: Arc<dyn TrackProvider>, query: SearchQuery) -> FetchHandle {
    tokio::spawn(async move { provider.fetch(&query).await })
}

fn join_result(
    joined: Result<Result<Vec<Track>, ProviderError>, tokio::task::JoinError>,
) -> Result<Vec<Track>, ProviderError> {
    joined.unwrap_or_else(|e| Err(ProviderError::Task(e.to_string())))
}

fn or_empty(provider: &dyn TrackProvider, result: Result<Vec<Track>, ProviderError>) -> Vec<Track> {
    match result {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!("{} search failed: {}", provider.name(), e);
            vec![]
        }
    }
}

pub struct SearchServiceBuilder {
    catalog: Option<Arc<dyn TrackProvider>>,
    lyrics: Option<Arc<dyn TrackProvider>>,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl SearchServiceBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            lyrics: None,
            store: None,
        }
    }

    pub fn catalog(mut self, provider: impl TrackProvider + 'static) -> Self {
        self.catalog = Some(Arc::new(provider));
        self
    }

    pub fn lyrics(mut self, provider: impl TrackProvider + 'static) -> Self {
        self.lyrics = Some(Arc::new(provider));
        self
    }

    pub fn store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<SearchService, &'static str> {
        Ok(SearchService {
            catalog: self.catalog.ok_or("a catalog provider is required")?,
            lyrics: self.lyrics.ok_or("a lyrics provider is required")?,
            store: self.store.ok_or("a snapshot store is required")?,
        })
    }
}

impl Default for SearchServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
