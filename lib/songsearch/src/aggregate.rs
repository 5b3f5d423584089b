use shared::{
    search::SearchQuery,
    track::{Origin, Track},
};

use crate::ranking::contains_ignore_case;

/// Whether a provider's track is relevant enough to keep.
///
/// Lyrics tracks carry no album, so only name and artist are checked for them.
pub fn retain(track: &Track, query: &SearchQuery) -> bool {
    let by_name_or_artist = contains_ignore_case(&track.name, &query.name)
        || contains_ignore_case(&track.artist, &query.artist);

    match track.origin {
        Origin::Lyrics => by_name_or_artist,
        Origin::Catalog => by_name_or_artist || contains_ignore_case(&track.album, &query.album),
    }
}

/// Filters both providers' tracks and concatenates them, lyrics first.
pub fn combine(catalog: Vec<Track>, lyrics: Vec<Track>, query: &SearchQuery) -> Vec<Track> {
    lyrics
        .into_iter()
        .chain(catalog)
        .filter(|track| retain(track, query))
        .collect()
}
