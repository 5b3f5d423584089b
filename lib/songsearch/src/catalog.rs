//! JSON catalog search (iTunes-style `results` array).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    search::SearchQuery,
    track::{Origin, Track},
};
use tracing::info;
use url::Url;

use crate::{
    error::{ProviderError, Result},
    http::{self, DEFAULT_TIMEOUT_SECS},
    TrackProvider,
};

pub const DEFAULT_CATALOG_URL: &str = "https://itunes.apple.com/search";

/// Prefix of every formatted catalog price.
pub const CURRENCY: &str = "GTQ";

#[derive(Deserialize, Debug)]
struct CatalogResponse {
    results: Vec<CatalogEntry>,
}

/// Absent and `null` fields both fall back to zero or empty.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct CatalogEntry {
    track_id: Option<i64>,
    track_name: Option<String>,
    artist_name: Option<String>,
    track_time_millis: Option<i64>,
    collection_name: Option<String>,
    artwork_url100: Option<String>,
    track_price: Option<f64>,
}

impl From<CatalogEntry> for Track {
    fn from(entry: CatalogEntry) -> Self {
        Track {
            id: entry.track_id.unwrap_or_default().to_string(),
            name: entry.track_name.unwrap_or_default(),
            artist: entry.artist_name.unwrap_or_default(),
            duration: format_duration(entry.track_time_millis.unwrap_or_default()),
            album: entry.collection_name.unwrap_or_default(),
            artwork: entry.artwork_url100.unwrap_or_default(),
            price: format_price(entry.track_price.unwrap_or_default()),
            origin: Origin::Catalog,
        }
    }
}

/// Formats a duration from milliseconds to `M:SS`. Negative input counts as zero.
pub fn format_duration(duration_ms: i64) -> String {
    let total_seconds = duration_ms.max(0) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

pub fn format_price(price: f64) -> String {
    format!("{CURRENCY} {price:.2}")
}

/// Builds the search URL. Empty artist/album terms are left out entirely.
pub fn search_url(base_url: &Url, query: &SearchQuery) -> Url {
    let mut url = base_url.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("term", &query.name)
            .append_pair("media", "music")
            .append_pair("music", "song");
        if !query.artist.is_empty() {
            pairs.append_pair("artist", &query.artist);
        }
        if !query.album.is_empty() {
            pairs.append_pair("album", &query.album);
        }
    }
    url
}

/// Decodes a catalog response body into tracks.
pub fn parse_response(body: &str) -> Result<Vec<Track>> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Decode(format!("JSON parse error: {e}")))?;
    Ok(response.results.into_iter().map(Track::from).collect())
}

#[derive(Debug, Clone)]
pub struct CatalogProvider {
    base_url: Url,
    client: Client,
}

#[derive(Default)]
pub struct CatalogProviderBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl CatalogProviderBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<CatalogProvider> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_CATALOG_URL))?;
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(CatalogProvider {
            base_url,
            client: http::build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TrackProvider for CatalogProvider {
    fn id(&self) -> &'static str {
        "catalog"
    }

    fn name(&self) -> &'static str {
        "iTunes"
    }

    fn origin(&self) -> Origin {
        Origin::Catalog
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Track>> {
        let url = search_url(&self.base_url, query);
        let body = http::get_text(&self.client, url).await?;
        let tracks = parse_response(&body)?;
        info!("{} returned {} tracks", self.name(), tracks.len());
        Ok(tracks)
    }
}
