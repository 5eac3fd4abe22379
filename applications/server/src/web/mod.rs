//! Human-facing routes
//!
//! These return the view model a page template would render, as JSON.
//! Successful form posts answer with `303 See Other` to the page that shows
//! the result.

pub mod albums;
pub mod home;
pub mod songs;
pub mod users;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// `302 Found`, the status used for canonical-URL redirects
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
