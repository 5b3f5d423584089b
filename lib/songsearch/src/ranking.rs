use std::cmp::Reverse;

use shared::{search::SearchQuery, track::Track};

/// Case-insensitive substring test. An empty `term` matches anything.
pub(crate) fn contains_ignore_case(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(&term.to_lowercase())
}

/// Number of name/artist/album dimensions where the track field contains
/// the corresponding query term (0 to 3).
pub fn score(track: &Track, query: &SearchQuery) -> u8 {
    [
        (&track.name, &query.name),
        (&track.artist, &query.artist),
        (&track.album, &query.album),
    ]
    .into_iter()
    .filter(|(field, term)| contains_ignore_case(field, term))
    .count() as u8
}

/// Orders tracks by descending score. Ties keep their input order.
pub fn rank(mut tracks: Vec<Track>, query: &SearchQuery) -> Vec<Track> {
    tracks.sort_by_cached_key(|track| Reverse(score(track, query)));
    tracks
}
