use crate::{error::Result, middleware::CurrentActor, services::catalog::HomeView, state::AppState};
use axum::{extract::State, Json};

/// GET /
/// What the home page lists depends on who is asking
pub async fn home(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<HomeView>> {
    Ok(Json(app_state.catalog.home(&actor).await?))
}
