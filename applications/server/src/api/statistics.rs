/// Statistics API route
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use dottify_core::stats::CatalogStatistics;

/// GET /api/statistics/
/// Recomputed on every call
pub async fn statistics(State(app_state): State<AppState>) -> Result<Json<CatalogStatistics>> {
    Ok(Json(app_state.catalog.statistics().await?))
}
