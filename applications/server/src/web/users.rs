/// Profile pages behind vanity URLs
use crate::{error::Result, middleware::CurrentActor, state::AppState, web::found};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use dottify_core::ProfileId;

/// GET /users/:id/
/// Always redirects to the canonical slug URL
pub async fn redirect_to_canonical(
    Path(id): Path<ProfileId>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let profile = app_state.catalog.profile(id).await?;
    Ok(found(&app_state.links.user_path(&profile)))
}

/// GET /users/:id/:slug/
/// A stale or wrong slug redirects; the id alone selects the profile
pub async fn detail(
    Path((id, slug)): Path<(ProfileId, String)>,
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Response> {
    let profile = app_state.catalog.profile(id).await?;
    if slug != profile.slug() {
        return Ok(found(&app_state.links.user_path(&profile)));
    }

    let detail = app_state.catalog.user_detail(&actor, id).await?;
    Ok(Json(detail).into_response())
}
