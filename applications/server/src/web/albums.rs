/// Album pages, forms, ratings and comments
use crate::{
    error::Result,
    middleware::CurrentActor,
    services::catalog::{AlbumDetail, AlbumForm},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Form, Json,
};
use dottify_core::{
    validation::{AlbumDraft, CommentDraft, RatingDraft},
    Album, AlbumId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub albums: Vec<Album>,
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub album: Album,
}

/// GET /albums/search/?q=
pub async fn search(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>> {
    let q = params.q.trim().to_string();
    let albums = app_state.catalog.search_albums(&actor, &q).await?;
    Ok(Json(SearchResults { albums, q }))
}

/// GET /albums/:id/
pub async fn detail(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumDetail>> {
    Ok(Json(app_state.catalog.album_detail(id).await?))
}

/// GET /albums/:id/:slug/
/// The id decides; the slug is decoration and is not checked
pub async fn detail_with_slug(
    Path((id, _slug)): Path<(AlbumId, String)>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumDetail>> {
    Ok(Json(app_state.catalog.album_detail(id).await?))
}

/// GET /albums/new/
pub async fn new_form(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<AlbumForm>> {
    Ok(Json(app_state.catalog.album_form(&actor, None).await?))
}

/// POST /albums/new/
pub async fn create(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<AlbumDraft>,
) -> Result<Redirect> {
    let album = app_state.catalog.create_album(&actor, &draft).await?;
    Ok(Redirect::to(&app_state.links.album_path(album.id)))
}

/// GET /albums/:id/edit/
pub async fn edit_form(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<AlbumForm>> {
    Ok(Json(app_state.catalog.album_form(&actor, Some(id)).await?))
}

/// POST /albums/:id/edit/
pub async fn update(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<AlbumDraft>,
) -> Result<Redirect> {
    let album = app_state.catalog.update_album(&actor, id, &draft).await?;
    Ok(Redirect::to(&app_state.links.album_path(album.id)))
}

/// GET /albums/:id/delete/
pub async fn confirm_delete(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<DeleteConfirmation>> {
    let album = app_state.catalog.album_for_delete(&actor, id).await?;
    Ok(Json(DeleteConfirmation { album }))
}

/// POST /albums/:id/delete/
pub async fn delete(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Redirect> {
    app_state.catalog.delete_album(&actor, id).await?;
    Ok(Redirect::to("/"))
}

/// POST /albums/:id/ratings/
pub async fn rate(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<RatingDraft>,
) -> Result<Redirect> {
    app_state.catalog.rate_album(&actor, id, &draft).await?;
    Ok(Redirect::to(&app_state.links.album_path(id)))
}

/// POST /albums/:id/comments/
pub async fn comment(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Form(draft): Form<CommentDraft>,
) -> Result<Redirect> {
    app_state.catalog.comment_on_album(&actor, id, &draft).await?;
    Ok(Redirect::to(&app_state.links.album_path(id)))
}
