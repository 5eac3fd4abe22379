use dottify_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Raw catalog figures in one round trip
///
/// `users` counts profiles, not bare login accounts.
pub async fn catalog_counts(pool: &SqlitePool) -> Result<CatalogCounts> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM profiles) AS users,
            (SELECT COUNT(*) FROM albums) AS albums,
            (SELECT COUNT(*) FROM playlists WHERE visibility = ?) AS public_playlists,
            (SELECT COUNT(*) FROM songs) AS songs,
            (SELECT COALESCE(SUM(length), 0) FROM songs) AS total_song_length
        "#,
    )
    .bind(i64::from(Visibility::Public))
    .fetch_one(pool)
    .await?;

    Ok(CatalogCounts {
        users: row.get("users"),
        albums: row.get("albums"),
        public_playlists: row.get("public_playlists"),
        songs: row.get("songs"),
        total_song_length: row.get("total_song_length"),
    })
}
