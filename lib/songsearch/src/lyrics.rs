//! XML lyrics lookup (ChartLyrics `SearchLyric`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    search::SearchQuery,
    track::{Origin, Track},
};
use tracing::{debug, info};
use url::Url;

use crate::{
    error::{ProviderError, Result},
    http::{self, DEFAULT_TIMEOUT_SECS},
    TrackProvider,
};

pub const DEFAULT_LYRICS_URL: &str = "http://api.chartlyrics.com/apiv1.asmx/SearchLyric";

#[derive(Deserialize, Debug, Default)]
struct SearchLyricResponse {
    #[serde(rename = "SearchLyricResult", default)]
    results: Vec<SearchLyricResult>,
}

/// One result entry. Lyric ids, checksums and URLs are ignored.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SearchLyricResult {
    #[serde(rename = "TrackId")]
    track_id: String,
    #[serde(rename = "Song")]
    song: String,
    #[serde(rename = "Artist")]
    artist: String,
}

/// Builds the search URL. Both parameters are always sent.
pub fn search_url(base_url: &Url, query: &SearchQuery) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("artist", &query.artist)
        .append_pair("song", &query.name);
    url
}

/// Decodes a lyrics response body into tracks.
///
/// The service pads its result list with empty `xsi:nil` entries; any
/// entry without a track id is dropped.
pub fn parse_response(body: &str) -> Result<Vec<Track>> {
    let response: SearchLyricResponse = quick_xml::de::from_str(body)
        .map_err(|e| ProviderError::Decode(format!("XML parse error: {e}")))?;

    let total = response.results.len();
    let tracks: Vec<Track> = response
        .results
        .into_iter()
        .filter(|entry| !entry.track_id.trim().is_empty())
        .map(|entry| Track::new(entry.track_id, entry.song, entry.artist, Origin::Lyrics))
        .collect();

    if tracks.len() < total {
        debug!("Dropped {} lyrics entries without a track id", total - tracks.len());
    }
    Ok(tracks)
}

#[derive(Debug, Clone)]
pub struct LyricsProvider {
    base_url: Url,
    client: Client,
}

#[derive(Default)]
pub struct LyricsProviderBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl LyricsProviderBuilder {
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

    pub fn build(self) -> Result<LyricsProvider> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_LYRICS_URL))?;
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(LyricsProvider {
            base_url,
            client: http::build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TrackProvider for LyricsProvider {
    fn id(&self) -> &'static str {
        "lyrics"
    }

    fn name(&self) -> &'static str {
        "ChartLyrics"
    }

    fn origin(&self) -> Origin {
        Origin::Lyrics
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Track>> {
        let url = search_url(&self.base_url, query);
        let body = http::get_text(&self.client, url).await?;
        let tracks = parse_response(&body)?;
        info!("{} returned {} tracks", self.name(), tracks.len());
        Ok(tracks)
    }
}
