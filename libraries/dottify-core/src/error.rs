/// Core error types for Dottify
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using `DottifyError`
pub type Result<T> = std::result::Result<T, DottifyError>;

/// Core error type for Dottify
#[derive(Error, Debug)]
pub enum DottifyError {
    /// One or more field-level invariants were violated
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The action needs a logged-in actor
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The actor lacks the role or ownership the action needs
    #[error("Permission denied: {0}")]
    AuthorizationDenied(String),

    /// Entity not found (or not visible to the caller)
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl DottifyError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an authorization error
    pub fn denied(msg: impl Into<String>) -> Self {
        Self::AuthorizationDenied(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a validation error for a single field
    pub fn invalid_field(
        field: impl Into<String>,
        kind: Violation,
        message: impl Into<String>,
    ) -> Self {
        let mut errors = ValidationErrors::default();
        errors.push(field, kind, message);
        Self::Validation(errors)
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for DottifyError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Category of a field-level violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// Value lies outside the permitted range
    OutOfRange,
    /// Value is in range but not on an allowed step
    Granularity,
    /// Value is missing or blank
    Required,
    /// Value exceeds the maximum length
    TooLong,
    /// Value could not be interpreted at all
    Invalid,
}

/// A single offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: Violation,
    pub message: String,
}

/// Every field-level violation found while checking one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Record a violation
    pub fn push(&mut self, field: impl Into<String>, kind: Violation, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            kind,
            message: message.into(),
        });
    }

    /// Fold a single-field check into the collection
    pub fn check(&mut self, outcome: std::result::Result<(), FieldError>) {
        if let Err(err) = outcome {
            self.0.push(err);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Violations recorded for `field`
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise a `DottifyError::Validation`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DottifyError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
