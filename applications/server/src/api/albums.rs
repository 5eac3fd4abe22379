/// Albums API routes
use crate::{error::Result, middleware::CurrentActor, services::Links, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use dottify_core::{validation::AlbumDraft, Album, AlbumFormat, AlbumId, Price};
use serde::Serialize;

/// Public album representation; the owning profile is never exposed
#[derive(Debug, Serialize)]
pub struct AlbumResource {
    pub id: AlbumId,
    pub title: String,
    pub artist_name: String,
    pub retail_price: Price,
    pub format: Option<AlbumFormat>,
    pub release_date: NaiveDate,
    pub slug: String,
    pub cover_image: String,
    /// Titles of the album's songs in track order
    pub song_set: Vec<String>,
}

impl AlbumResource {
    fn new(album: Album, song_titles: Vec<String>, links: &Links) -> Self {
        Self {
            id: album.id,
            cover_image: links.cover_url(&album.cover_image),
            title: album.title,
            artist_name: album.artist_name,
            retail_price: album.retail_price,
            format: album.format,
            release_date: album.release_date,
            slug: album.slug,
            song_set: song_titles,
        }
    }
}

async fn represent(app_state: &AppState, album: Album) -> Result<AlbumResource> {
    let titles = app_state
        .catalog
        .album_songs(album.id)
        .await?
        .into_iter()
        .map(|s| s.title)
        .collect();
    Ok(AlbumResource::new(album, titles, &app_state.links))
}

/// GET /api/albums/
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<Vec<AlbumResource>>> {
    let albums = app_state.catalog.albums().await?;
    let mut resources = Vec::with_capacity(albums.len());
    for album in albums {
        resources.push(represent(&app_state, album).await?);
    }
    Ok(Json(resources))
}

/// GET /api/albums/:id/
pub async fn get_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumResource>> {
    let album = app_state.catalog.album(id).await?;
    Ok(Json(represent(&app_state, album).await?))
}

/// POST /api/albums/
/// Create an album; an artist's album is always their own
pub async fn create_album(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(draft): Json<AlbumDraft>,
) -> Result<(StatusCode, Json<AlbumResource>)> {
    let album = app_state.catalog.create_album(&actor, &draft).await?;
    Ok((StatusCode::CREATED, Json(represent(&app_state, album).await?)))
}

/// PUT /api/albums/:id/
pub async fn update_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(draft): Json<AlbumDraft>,
) -> Result<Json<AlbumResource>> {
    let album = app_state.catalog.update_album(&actor, id, &draft).await?;
    Ok(Json(represent(&app_state, album).await?))
}

/// DELETE /api/albums/:id/
pub async fn delete_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<StatusCode> {
    app_state.catalog.delete_album(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
