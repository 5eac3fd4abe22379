/// Authentication middleware
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use dottify_core::{Actor, CatalogStore};

/// The actor behind the current request
///
/// Inserted by [`resolve_actor`]; usable as an extractor. Requests that
/// never passed through the middleware are anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentActor(pub Actor);

/// Resolve the actor once per request
///
/// No `Authorization` header means an anonymous actor. A valid Bearer
/// access token loads the account's roles and profile. Anything else is
/// rejected with 401.
pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let actor = match bearer_token(request.headers())? {
        None => Actor::Anonymous,
        Some(token) => {
            let account_id = state.auth_service.verify_access_token(token).map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ServerError::Auth("Invalid token".to_string())
            })?;
            load_actor(&state, account_id).await?
        }
    };

    request.extensions_mut().insert(CurrentActor(actor));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, ServerError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(Some)
        .ok_or_else(|| ServerError::Auth("Expected a Bearer token".to_string()))
}

async fn load_actor(state: &AppState, account_id: dottify_core::AccountId) -> Result<Actor, ServerError> {
    let account = state
        .db
        .get_account(account_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Account no longer exists".to_string()))?;

    let roles = state.db.get_roles(account.id).await?;
    let profile = state.db.get_profile_by_account(account.id).await?;

    Ok(Actor::member(account.id, profile.map(|p| p.id), roles))
}

/// Implement FromRequestParts so CurrentActor can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentActor>()
            .cloned()
            .unwrap_or_default())
    }
}
