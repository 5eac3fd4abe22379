/// Song pages and forms
use crate::{
    error::Result,
    middleware::CurrentActor,
    services::catalog::{SongDetail, SongForm},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use dottify_core::{validation::SongDraft, Song, SongId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub song: Song,
}

/// GET /songs/:id/
pub async fn detail(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
) -> Result<Json<SongDetail>> {
    Ok(Json(app_state.catalog.song_detail(id).await?))
}

/// GET /songs/new/
pub async fn new_form(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<SongForm>> {
    Ok(Json(app_state.catalog.song_form(&actor, None).await?))
}

/// POST /songs/new/
pub async fn create(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<SongDraft>,
) -> Result<Redirect> {
    let song = app_state.catalog.create_song(&actor, &draft).await?;
    Ok(Redirect::to(&app_state.links.song_path(song.id)))
}

/// GET /songs/:id/edit/
pub async fn edit_form(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<SongForm>> {
    Ok(Json(app_state.catalog.song_form(&actor, Some(id)).await?))
}

/// POST /songs/:id/edit/
pub async fn update(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<SongDraft>,
) -> Result<Redirect> {
    let song = app_state.catalog.update_song(&actor, id, &draft).await?;
    Ok(Redirect::to(&app_state.links.song_path(song.id)))
}

/// GET /songs/:id/delete/
pub async fn confirm_delete(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<DeleteConfirmation>> {
    let song = app_state.catalog.song_for_delete(&actor, id).await?;
    Ok(Json(DeleteConfirmation { song }))
}

/// POST /songs/:id/delete/
pub async fn delete(
    Path(id): Path<SongId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Redirect> {
    app_state.catalog.delete_song(&actor, id).await?;
    Ok(Redirect::to("/"))
}
