/// Songs API routes
use crate::{error::Result, middleware::CurrentActor, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dottify_core::{validation::SongDraft, AlbumId, Song, SongId};
use serde::Serialize;

/// Public song representation; the position is internal
#[derive(Debug, Serialize)]
pub struct SongResource {
    pub id: SongId,
    pub title: String,
    pub length: i64,
    pub album: AlbumId,
}

impl From<Song> for SongResource {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            length: song.length,
            album: song.album_id,
        }
    }
}

/// GET /api/songs/
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<Vec<SongResource>>> {
    let songs = app_state.catalog.songs().await?;
    Ok(Json(songs.into_iter().map(SongResource::from).collect()))
}

/// GET /api/songs/:id/
pub async fn get_song(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
) -> Result<Json<SongResource>> {
    let song = app_state.catalog.song(id).await?;
    Ok(Json(song.into()))
}

/// POST /api/songs/
/// Add a song to the end of its album
pub async fn create_song(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(draft): Json<SongDraft>,
) -> Result<(StatusCode, Json<SongResource>)> {
    let song = app_state.catalog.create_song(&actor, &draft).await?;
    Ok((StatusCode::CREATED, Json(song.into())))
}

/// PUT /api/songs/:id/
pub async fn update_song(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(draft): Json<SongDraft>,
) -> Result<Json<SongResource>> {
    let song = app_state.catalog.update_song(&actor, id, &draft).await?;
    Ok(Json(song.into()))
}

/// DELETE /api/songs/:id/
pub async fn delete_song(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<StatusCode> {
    app_state.catalog.delete_song(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
