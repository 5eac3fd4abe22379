/// Songs nested under an album
use crate::{api::songs::SongResource, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use dottify_core::{AlbumId, SongId};

/// GET /api/albums/:album_id/songs/
pub async fn list_album_songs(
    Path(album_id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<SongResource>>> {
    let songs = app_state.catalog.album_songs(album_id).await?;
    Ok(Json(songs.into_iter().map(SongResource::from).collect()))
}

/// GET /api/albums/:album_id/songs/:song_id/
/// 404 when the song exists but sits on another album
pub async fn get_album_song(
    Path((album_id, song_id)): Path<(AlbumId, SongId)>,
    State(app_state): State<AppState>,
) -> Result<Json<SongResource>> {
    let song = app_state.catalog.album_song(album_id, song_id).await?;
    Ok(Json(song.into()))
}
