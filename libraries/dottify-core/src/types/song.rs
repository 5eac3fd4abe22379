//! Song types

use super::ids::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// A song on exactly one album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    /// Length in seconds
    pub length: i64,
    /// 1-based, assigned by the store at creation and never renumbered
    pub position: i64,
    pub album_id: AlbumId,
}

/// Writable song fields, already validated. Position is never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInput {
    pub title: String,
    pub length: i64,
    pub album_id: AlbumId,
}
