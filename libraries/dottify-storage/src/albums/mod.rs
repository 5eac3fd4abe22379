use crate::StorageError;
use dottify_core::{error::Result, slug::slugify, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const DUPLICATE_ALBUM: &str = "Album with this Title, Artist name and Format already exists.";

const SELECT_ALBUM: &str = r#"
    SELECT id, title, artist_name, artist_account, retail_price, format,
           release_date, slug, cover_image
    FROM albums
"#;

fn from_row(row: &SqliteRow) -> Result<Album> {
    let format = row
        .get::<Option<String>, _>("format")
        .map(|code| code.parse::<AlbumFormat>())
        .transpose()
        .map_err(StorageError::corrupt)?;

    Ok(Album {
        id: row.get("id"),
        title: row.get("title"),
        artist_name: row.get("artist_name"),
        artist_account: row.get("artist_account"),
        retail_price: Price::from_scaled(row.get("retail_price")),
        format,
        release_date: row.get("release_date"),
        slug: row.get("slug"),
        cover_image: row.get("cover_image"),
    })
}

fn from_rows(rows: &[SqliteRow]) -> Result<Vec<Album>> {
    rows.iter().map(from_row).collect()
}

/// Get all albums
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!("{SELECT_ALBUM} ORDER BY title, id"))
        .fetch_all(pool)
        .await?;

    from_rows(&rows)
}

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("{SELECT_ALBUM} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Albums whose `artist_account` is the given profile
pub async fn get_by_owner(pool: &SqlitePool, owner: ProfileId) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!("{SELECT_ALBUM} WHERE artist_account = ? ORDER BY title, id"))
        .bind(owner)
        .fetch_all(pool)
        .await?;

    from_rows(&rows)
}

/// Case-insensitive substring match on the title
///
/// `%` and `_` in the query are matched literally.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Album>> {
    let pattern = format!("%{}%", escape_like(query));
    let rows = sqlx::query(&format!(
        "{SELECT_ALBUM} WHERE title LIKE ? ESCAPE '\\' ORDER BY title, id"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    from_rows(&rows)
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Another album with the same (title, artist name, format)
///
/// An album without a format never collides, matching how the UNIQUE
/// constraint treats NULL.
pub async fn find_duplicate(
    pool: &SqlitePool,
    title: &str,
    artist_name: &str,
    format: Option<AlbumFormat>,
    excluding: Option<AlbumId>,
) -> Result<Option<AlbumId>> {
    let Some(format) = format else {
        return Ok(None);
    };

    let row = sqlx::query(
        r#"
        SELECT id FROM albums
        WHERE title = ? AND artist_name = ? AND format = ? AND (? IS NULL OR id != ?)
        LIMIT 1
        "#,
    )
    .bind(title)
    .bind(artist_name)
    .bind(format.code())
    .bind(excluding)
    .bind(excluding)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Create an album; the slug is computed from the title
pub async fn create(
    pool: &SqlitePool,
    album: AlbumInput,
    owner: Option<ProfileId>,
) -> Result<Album> {
    let cover_image = album
        .cover_image
        .clone()
        .unwrap_or_else(|| NO_COVER_IMAGE.to_string());

    let result = sqlx::query(
        r#"
        INSERT INTO albums (title, artist_name, artist_account, retail_price, format,
                            release_date, slug, cover_image)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&album.title)
    .bind(&album.artist_name)
    .bind(owner)
    .bind(album.retail_price.scaled())
    .bind(album.format.map(|f| f.code()))
    .bind(album.release_date)
    .bind(slugify(&album.title))
    .bind(&cover_image)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_write(e, DUPLICATE_ALBUM))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| dottify_core::DottifyError::storage("Failed to retrieve created album"))
}

/// Replace the writable fields of an album and recompute its slug
///
/// The owner is never changed here. A `None` cover keeps the current image.
pub async fn update(pool: &SqlitePool, id: AlbumId, album: AlbumInput) -> Result<Album> {
    let result = sqlx::query(
        r#"
        UPDATE albums
        SET title = ?, artist_name = ?, retail_price = ?, format = ?, release_date = ?,
            slug = ?, cover_image = COALESCE(?, cover_image)
        WHERE id = ?
        "#,
    )
    .bind(&album.title)
    .bind(&album.artist_name)
    .bind(album.retail_price.scaled())
    .bind(album.format.map(|f| f.code()))
    .bind(album.release_date)
    .bind(slugify(&album.title))
    .bind(&album.cover_image)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_write(e, DUPLICATE_ALBUM))?;

    if result.rows_affected() == 0 {
        return Err(dottify_core::DottifyError::not_found("Album", id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| dottify_core::DottifyError::not_found("Album", id))
}

/// Delete an album; its songs, ratings and comments go with it
pub async fn delete(pool: &SqlitePool, id: AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(dottify_core::DottifyError::not_found("Album", id));
    }

    Ok(())
}
