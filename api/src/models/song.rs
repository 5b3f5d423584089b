use async_trait::async_trait;
use shared::track::Track;
use songsearch::{error::StorageError, SnapshotStore};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::debug;

const CREATE_SONGS: &str = include_str!("../../migrations/20240101000000_create_songs.sql");

#[derive(Debug, sqlx::FromRow)]
struct SongRow {
    id: i64,
    name: String,
    artist: String,
    duration: Option<String>,
    album: Option<String>,
    artwork: Option<String>,
    price: Option<String>,
    origin: String,
}

impl TryFrom<SongRow> for Track {
    type Error = StorageError;

    fn try_from(row: SongRow) -> Result<Self, Self::Error> {
        Ok(Track {
            id: row.id.to_string(),
            name: row.name,
            artist: row.artist,
            duration: row.duration.unwrap_or_default(),
            album: row.album.unwrap_or_default(),
            artwork: row.artwork.unwrap_or_default(),
            price: row.price.unwrap_or_default(),
            origin: row.origin.parse().map_err(StorageError::InvalidOrigin)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> StorageError {
    StorageError::Database(e.to_string())
}

/// The `songs` table, holding only the latest search's results.
///
/// Snapshot writes are serialized within this process. The delete and
/// inserts are not one transaction, so a failure part way leaves a
/// partial snapshot behind until the next search replaces it.
pub struct SongSnapshot {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl SongSnapshot {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }

    async fn ensure_table(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_SONGS)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let deleted = sqlx::query("DELETE FROM songs")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        debug!("Cleared {} rows from previous snapshot", deleted.rows_affected());
        Ok(())
    }

    /// Inserts one row; the provider id is dropped in favor of the row id.
    async fn insert(&self, track: &Track) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO songs (name, artist, duration, album, artwork, price, origin) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&track.name)
        .bind(&track.artist)
        .bind(&track.duration)
        .bind(&track.album)
        .bind(&track.artwork)
        .bind(&track.price)
        .bind(track.origin.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Track>, StorageError> {
        sqlx::query_as::<_, SongRow>(
            "SELECT id, name, artist, duration, album, artwork, price, origin FROM songs ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Track::try_from)
        .collect()
    }
}

#[async_trait]
impl SnapshotStore for SongSnapshot {
    async fn replace_and_reload(&self, tracks: &[Track]) -> Result<Vec<Track>, StorageError> {
        let _guard = self.write_lock.lock().await;

        self.ensure_table().await?;
        self.delete_all().await?;
        for track in tracks {
            self.insert(track).await?;
        }

        self.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use shared::track::Origin;

    async fn store() -> SongSnapshot {
        SongSnapshot::new(db::connect("sqlite::memory:").await.unwrap())
    }

    fn catalog_track(id: &str, name: &str) -> Track {
        Track {
            id: id.into(),
            name: name.into(),
            artist: "Taylor Swift".into(),
            duration: "3:55".into(),
            album: "Fearless".into(),
            artwork: "https://img/100.jpg".into(),
            price: "GTQ 1.29".into(),
            origin: Origin::Catalog,
        }
    }

    #[tokio::test]
    async fn reload_returns_same_content_in_insert_order() {
        let store = store().await;
        let input = vec![
            catalog_track("1440857781", "Love Story"),
            Track::new("1481", "Lover", "Y", Origin::Lyrics),
            catalog_track("99", "Fifteen"),
        ];

        let stored = store.replace_and_reload(&input).await.unwrap();

        assert_eq!(stored.len(), input.len());
        for (saved, original) in stored.iter().zip(&input) {
            assert!(saved.same_content(original), "{saved:?} != {original:?}");
        }
        assert_eq!(stored[1].duration, "");
        assert_eq!(stored[1].origin, Origin::Lyrics);
    }

    #[tokio::test]
    async fn ids_are_assigned_by_the_store() {
        let store = store().await;
        let stored = store
            .replace_and_reload(&[catalog_track("1440857781", "Love Story")])
            .await
            .unwrap();
        assert_ne!(stored[0].id, "1440857781");
        assert!(stored[0].id.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn each_call_replaces_the_previous_snapshot() {
        let store = store().await;
        store
            .replace_and_reload(&[catalog_track("1", "Old A"), catalog_track("2", "Old B")])
            .await
            .unwrap();

        let stored = store
            .replace_and_reload(&[catalog_track("3", "New")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "New");

        let empty = store.replace_and_reload(&[]).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn recreates_a_dropped_table() {
        let store = store().await;
        sqlx::query("DROP TABLE songs").execute(&store.pool).await.unwrap();

        let stored = store
            .replace_and_reload(&[catalog_track("1", "Back")])
            .await
            .unwrap();
        assert_eq!(stored[0].name, "Back");
    }

    #[tokio::test]
    async fn null_columns_read_back_empty() {
        let store = store().await;
        sqlx::query("INSERT INTO songs (name, artist, origin) VALUES ('n', 'a', 'ChartLyrics')")
            .execute(&store.pool)
            .await
            .unwrap();

        let rows = store.get_all().await.unwrap();
        assert_eq!(rows[0].album, "");
        assert_eq!(rows[0].price, "");
    }

    #[tokio::test]
    async fn unknown_origin_is_a_storage_error() {
        let store = store().await;
        sqlx::query("INSERT INTO songs (name, artist, origin) VALUES ('n', 'a', 'Napster')")
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(matches!(
            store.get_all().await,
            Err(StorageError::InvalidOrigin(_))
        ));
    }

    #[tokio::test]
    async fn closed_pool_fails() {
        let store = store().await;
        store.pool.close().await;

        assert!(matches!(
            store.replace_and_reload(&[catalog_track("1", "x")]).await,
            Err(StorageError::Database(_))
        ));
    }
}
