use serde::{Deserialize, Serialize};

use crate::track::Track;

/// Caller-supplied search terms. An empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub name: String,
    pub artist: String,
    pub album: String,
}

impl SearchQuery {
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }
}

/// The response body of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "results")]
    pub tracks: Vec<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResult {
    pub const NO_MATCHES: &'static str = "No songs matched the search criteria.";

    /// Wraps the final track list, attaching the "no matches" notice when it is empty.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let message = tracks.is_empty().then(|| Self::NO_MATCHES.to_string());
        Self { tracks, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Origin;

    #[test]
    fn empty_result_carries_message() {
        let result = SearchResult::from_tracks(vec![]);
        assert_eq!(result.message.as_deref(), Some(SearchResult::NO_MATCHES));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["results"], serde_json::json!([]));
        assert_eq!(json["message"], SearchResult::NO_MATCHES);
    }

    #[test]
    fn non_empty_result_omits_message() {
        let result = SearchResult::from_tracks(vec![Track::new("1", "a", "b", Origin::Lyrics)]);
        assert!(result.message.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["results"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn query_fields_default_to_empty() {
        let query: SearchQuery = serde_json::from_str(r#"{"name":"love"}"#).unwrap();
        assert_eq!(query, SearchQuery::new("love", "", ""));
    }
}
