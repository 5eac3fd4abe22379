use crate::StorageError;
use chrono::{DateTime, Utc};
use dottify_core::{error::Result, types::*, DottifyError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::convert::TryFrom;

const SELECT_PLAYLIST: &str = "SELECT id, name, created_at, visibility, owner_id FROM playlists";

fn from_row(row: &SqliteRow) -> Result<Playlist> {
    let visibility =
        Visibility::try_from(row.get::<i64, _>("visibility")).map_err(StorageError::corrupt)?;

    Ok(Playlist {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        visibility,
        owner_id: row.get("owner_id"),
        song_ids: Vec::new(),
    })
}

/// Map rows and attach each playlist's song ids
async fn load(pool: &SqlitePool, rows: &[SqliteRow]) -> Result<Vec<Playlist>> {
    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        let mut playlist = from_row(row)?;
        playlist.song_ids = song_ids(pool, playlist.id).await?;
        playlists.push(playlist);
    }
    Ok(playlists)
}

async fn song_ids(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<SongId>> {
    let rows = sqlx::query("SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY song_id")
        .bind(playlist_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.get("song_id")).collect())
}

/// Get all playlists regardless of visibility
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!("{SELECT_PLAYLIST} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    load(pool, &rows).await
}

/// Playlists whose visibility is Public
pub async fn get_public(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!("{SELECT_PLAYLIST} WHERE visibility = ? ORDER BY id"))
        .bind(i64::from(Visibility::Public))
        .fetch_all(pool)
        .await?;

    load(pool, &rows).await
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!("{SELECT_PLAYLIST} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(load(pool, std::slice::from_ref(&row)).await?.pop()),
        None => Ok(None),
    }
}

/// Playlists owned by a profile
pub async fn get_by_owner(pool: &SqlitePool, owner: ProfileId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!("{SELECT_PLAYLIST} WHERE owner_id = ? ORDER BY id"))
        .bind(owner)
        .fetch_all(pool)
        .await?;

    load(pool, &rows).await
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO playlists (name, created_at, visibility, owner_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&playlist.name)
    .bind(now)
    .bind(i64::from(playlist.visibility))
    .bind(playlist.owner_id)
    .execute(pool)
    .await?;

    Ok(Playlist {
        id: result.last_insert_rowid(),
        name: playlist.name,
        created_at: now,
        visibility: playlist.visibility,
        owner_id: playlist.owner_id,
        song_ids: Vec::new(),
    })
}

/// Add a song to a playlist; adding it again changes nothing
pub async fn add_song(pool: &SqlitePool, playlist_id: PlaylistId, song_id: SongId) -> Result<()> {
    let result = sqlx::query("INSERT OR IGNORE INTO playlist_songs (playlist_id, song_id) VALUES (?, ?)")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Err(
            DottifyError::not_found("Playlist or song", format!("{playlist_id}/{song_id}")),
        ),
        Err(e) => Err(e.into()),
    }
}
