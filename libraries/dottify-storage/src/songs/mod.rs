use crate::StorageError;
use dottify_core::{error::Result, types::*, DottifyError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const DUPLICATE_SONG: &str = "Song with this Title already exists on this album.";

fn from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        length: row.get("length"),
        position: row.get("position"),
        album_id: row.get("album_id"),
    }
}

/// Get all songs
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        "SELECT id, title, length, position, album_id FROM songs ORDER BY album_id, position",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Option<Song>> {
    let row = sqlx::query("SELECT id, title, length, position, album_id FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Songs on an album in track order
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        "SELECT id, title, length, position, album_id FROM songs WHERE album_id = ? ORDER BY position, id",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Whether a different song on the album already uses `title`
pub async fn title_taken(
    pool: &SqlitePool,
    album_id: AlbumId,
    title: &str,
    excluding: Option<SongId>,
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM songs
            WHERE album_id = ? AND title = ? AND (? IS NULL OR id != ?)
        ) AS taken
        "#,
    )
    .bind(album_id)
    .bind(title)
    .bind(excluding)
    .bind(excluding)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("taken") != 0)
}

/// Create a song at the end of its album
///
/// The position is computed inside the INSERT, so two concurrent creates on
/// the same album cannot both read the same maximum.
pub async fn create(pool: &SqlitePool, song: SongInput) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, length, position, album_id)
        SELECT ?, ?, COALESCE(MAX(position), 0) + 1, ?
        FROM songs
        WHERE album_id = ?
        "#,
    )
    .bind(&song.title)
    .bind(song.length)
    .bind(song.album_id)
    .bind(song.album_id)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_write(e, DUPLICATE_SONG))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| DottifyError::storage("Failed to retrieve created song"))
}

/// Replace title, length and album; the position is left alone
pub async fn update(pool: &SqlitePool, id: SongId, song: SongInput) -> Result<Song> {
    let result = sqlx::query("UPDATE songs SET title = ?, length = ?, album_id = ? WHERE id = ?")
        .bind(&song.title)
        .bind(song.length)
        .bind(song.album_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| StorageError::from_write(e, DUPLICATE_SONG))?;

    if result.rows_affected() == 0 {
        return Err(DottifyError::not_found("Song", id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| DottifyError::not_found("Song", id))
}

/// Delete a song
pub async fn delete(pool: &SqlitePool, id: SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DottifyError::not_found("Song", id));
    }

    Ok(())
}
