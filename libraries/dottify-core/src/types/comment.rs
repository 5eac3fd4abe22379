//! Comment types

use super::ids::{AlbumId, CommentId, ProfileId};
use serde::{Deserialize, Serialize};

/// A comment left on an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub album_id: AlbumId,
    pub profile_id: ProfileId,
    /// Denormalized author name for display
    pub author: String,
    pub comment_text: String,
}

/// Data for creating a new comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub album_id: AlbumId,
    pub profile_id: ProfileId,
    pub comment_text: String,
}
