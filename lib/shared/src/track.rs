use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which provider produced a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    #[serde(rename = "iTunes")]
    Catalog,
    #[serde(rename = "ChartLyrics")]
    Lyrics,
}

impl Origin {
    /// The tag written on the wire and in the `songs.origin` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Catalog => "iTunes",
            Origin::Lyrics => "ChartLyrics",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iTunes" => Ok(Origin::Catalog),
            "ChartLyrics" => Ok(Origin::Lyrics),
            other => Err(format!("unknown track origin: {other}")),
        }
    }
}

/// A normalized track, whatever provider it came from.
///
/// Fields a provider does not supply are empty strings. `id` is only
/// unique within its origin until the track has been persisted, after
/// which it is the store-assigned row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    /// `M:SS`, or empty.
    pub duration: String,
    pub album: String,
    pub artwork: String,
    /// Currency-prefixed with two decimals, or empty.
    pub price: String,
    pub origin: Origin,
}

impl Track {
    /// A track carrying only the fields every provider supplies.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            duration: String::new(),
            album: String::new(),
            artwork: String::new(),
            price: String::new(),
            origin,
        }
    }

    /// Field-by-field equality ignoring `id`.
    pub fn same_content(&self, other: &Track) -> bool {
        self.name == other.name
            && self.artist == other.artist
            && self.duration == other.duration
            && self.album == other.album
            && self.artwork == other.artwork
            && self.price == other.price
            && self.origin == other.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_round_trips_through_its_tag() {
        for origin in [Origin::Catalog, Origin::Lyrics] {
            assert_eq!(origin.as_str().parse::<Origin>(), Ok(origin));
        }
        assert!("Spotify".parse::<Origin>().is_err());
    }

    #[test]
    fn track_serializes_fields_in_wire_order() {
        let track = Track {
            id: "1".into(),
            name: "Blue Moon".into(),
            artist: "Billie Holiday".into(),
            duration: "3:25".into(),
            album: "Lady Day".into(),
            artwork: "https://img/1.jpg".into(),
            price: "GTQ 1.29".into(),
            origin: Origin::Catalog,
        };

        let json = serde_json::to_string(&track).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","name":"Blue Moon","artist":"Billie Holiday","duration":"3:25","album":"Lady Day","artwork":"https://img/1.jpg","price":"GTQ 1.29","origin":"iTunes"}"#
        );
    }

    #[test]
    fn same_content_ignores_id() {
        let a = Track::new("12", "Lover", "Y", Origin::Lyrics);
        let mut b = a.clone();
        b.id = "1".into();
        assert!(a.same_content(&b));

        b.artist = "Z".into();
        assert!(!a.same_content(&b));
    }
}
