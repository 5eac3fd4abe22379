//! Rating types

use super::decimal::Stars;
use super::ids::{AlbumId, RatingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A star rating given to an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub album_id: AlbumId,
    pub stars: Stars,
    /// Set by the store at insertion
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new rating
#[derive(Debug, Clone, Copy)]
pub struct CreateRating {
    pub album_id: AlbumId,
    pub stars: Stars,
}
