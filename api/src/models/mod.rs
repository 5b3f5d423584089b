pub mod song;

pub use song::SongSnapshot;
