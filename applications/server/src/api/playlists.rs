/// Playlists API routes (read-only, Public playlists only)
use crate::{
    error::Result,
    services::{catalog::PlaylistListing, Links},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use dottify_core::{PlaylistId, Visibility};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlaylistResource {
    pub id: PlaylistId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub visibility: Visibility,
    /// Owner's display name
    pub owner: String,
    /// Links to the song endpoints
    pub songs: Vec<String>,
}

impl PlaylistResource {
    fn new(listing: PlaylistListing, links: &Links) -> Self {
        let PlaylistListing {
            playlist,
            owner_name,
        } = listing;

        Self {
            id: playlist.id,
            name: playlist.name,
            created_at: playlist.created_at,
            visibility: playlist.visibility,
            owner: owner_name,
            songs: playlist
                .song_ids
                .iter()
                .map(|id| links.song_api_url(*id))
                .collect(),
        }
    }
}

/// GET /api/playlists/
pub async fn list_playlists(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PlaylistResource>>> {
    let listings = app_state.catalog.public_playlists().await?;
    Ok(Json(
        listings
            .into_iter()
            .map(|l| PlaylistResource::new(l, &app_state.links))
            .collect(),
    ))
}

/// GET /api/playlists/:id/
/// Hidden and Unlisted playlists are reported as not found
pub async fn get_playlist(
    Path(id): Path<PlaylistId>,
    State(app_state): State<AppState>,
) -> Result<Json<PlaylistResource>> {
    let listing = app_state.catalog.public_playlist(id).await?;
    Ok(Json(PlaylistResource::new(listing, &app_state.links)))
}
