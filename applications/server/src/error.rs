/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dottify_core::{DottifyError, ValidationErrors};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<DottifyError> for ServerError {
    fn from(err: DottifyError) -> Self {
        match err {
            DottifyError::Validation(errors) => ServerError::Validation(errors),
            DottifyError::Conflict(msg) => ServerError::Conflict(msg),
            DottifyError::AuthenticationRequired => ServerError::AuthenticationRequired,
            DottifyError::AuthorizationDenied(msg) => ServerError::Forbidden(msg),
            DottifyError::NotFound { entity, id } => ServerError::NotFound(format!("{entity} {id}")),
            DottifyError::Storage(msg) => ServerError::Internal(msg),
            DottifyError::Database(msg) => ServerError::Database(msg),
        }
    }
}

impl From<dottify_storage::StorageError> for ServerError {
    fn from(err: dottify_storage::StorageError) -> Self {
        // StorageError -> DottifyError -> ServerError
        DottifyError::from(err).into()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "Authentication credentials were not provided.".to_string(),
            ),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            // Hidden and missing resources look the same from outside
            ServerError::NotFound(ref what) => {
                tracing::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, "Not found.".to_string())
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Validation(errors) => return validation_response(&errors),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// 400 with every offending field: `{"error", "fields": {name: [msg]}, "violations"}`
fn validation_response(errors: &ValidationErrors) -> Response {
    let mut fields: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for e in errors.errors() {
        fields.entry(e.field.as_str()).or_default().push(e.message.as_str());
    }

    let body = Json(json!({
        "error": "Validation failed",
        "fields": fields,
        "violations": errors,
    }));

    (StatusCode::BAD_REQUEST, body).into_response()
}
