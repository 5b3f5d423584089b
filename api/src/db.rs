use std::path::Path;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the connection pool, creating the database file if needed, and
/// applies migrations. Called once at startup.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = is_in_memory(database_url);

    if !in_memory && database_url.starts_with("sqlite:") {
        let path_str = database_url.trim_start_matches("sqlite:");
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        let path = Path::new(path_str);
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path)?;
            info!("Created database file {}", path.display());
        }
    }

    // Every in-memory connection is its own database, so keep exactly one alive.
    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = options.connect(database_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:songs?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:songsearch.db"));
    }

    #[tokio::test]
    async fn migrations_create_songs_table() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
