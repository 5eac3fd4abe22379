use dottify_core::{error::Result, types::*, DottifyError};
use sqlx::{Row, SqlitePool};

/// Record a comment and return it with its author's display name
pub async fn create(pool: &SqlitePool, comment: CreateComment) -> Result<Comment> {
    let result =
        sqlx::query("INSERT INTO comments (album_id, profile_id, comment_text) VALUES (?, ?, ?)")
            .bind(comment.album_id)
            .bind(comment.profile_id)
            .bind(&comment.comment_text)
            .execute(pool)
            .await?;

    let id = result.last_insert_rowid();

    get_by_album(pool, comment.album_id)
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| DottifyError::storage("Failed to retrieve created comment"))
}

/// Comments on an album in posting order
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.album_id, c.profile_id, c.comment_text, p.display_name AS author
        FROM comments c
        INNER JOIN profiles p ON c.profile_id = p.id
        WHERE c.album_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Comment {
            id: row.get("id"),
            album_id: row.get("album_id"),
            profile_id: row.get("profile_id"),
            author: row.get("author"),
            comment_text: row.get("comment_text"),
        })
        .collect())
}
