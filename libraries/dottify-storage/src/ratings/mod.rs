use chrono::{DateTime, Utc};
use dottify_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Record a rating, stamped with the current time
pub async fn create(pool: &SqlitePool, rating: CreateRating) -> Result<Rating> {
    create_at(pool, rating, Utc::now()).await
}

/// Record a rating with an explicit timestamp
///
/// Used by imports and fixtures that need back-dated ratings.
pub async fn create_at(
    pool: &SqlitePool,
    rating: CreateRating,
    created_at: DateTime<Utc>,
) -> Result<Rating> {
    let result = sqlx::query("INSERT INTO ratings (album_id, stars, created_at) VALUES (?, ?, ?)")
        .bind(rating.album_id)
        .bind(rating.stars.scaled())
        .bind(created_at)
        .execute(pool)
        .await?;

    Ok(Rating {
        id: result.last_insert_rowid(),
        album_id: rating.album_id,
        stars: rating.stars,
        created_at,
    })
}

/// Ratings for an album, oldest first
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Rating>> {
    let rows = sqlx::query(
        "SELECT id, album_id, stars, created_at FROM ratings WHERE album_id = ? ORDER BY created_at, id",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Rating {
            id: row.get("id"),
            album_id: row.get("album_id"),
            stars: Stars::from_scaled(row.get("stars")),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        })
        .collect())
}
