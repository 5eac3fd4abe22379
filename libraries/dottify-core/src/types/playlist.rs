//! Playlist types

use super::ids::{PlaylistId, ProfileId, SongId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How widely a playlist is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Visibility {
    #[default]
    Hidden,
    Unlisted,
    Public,
}

impl Visibility {
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Hidden => "Hidden",
            Visibility::Unlisted => "Unlisted",
            Visibility::Public => "Public",
        }
    }
}

impl From<Visibility> for i64 {
    fn from(v: Visibility) -> Self {
        match v {
            Visibility::Hidden => 0,
            Visibility::Unlisted => 1,
            Visibility::Public => 2,
        }
    }
}

impl TryFrom<i64> for Visibility {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visibility::Hidden),
            1 => Ok(Visibility::Unlisted),
            2 => Ok(Visibility::Public),
            other => Err(format!("Invalid visibility: {other}")),
        }
    }
}

/// A named, owned set of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub visibility: Visibility,
    pub owner_id: ProfileId,
    /// Song ids, order irrelevant
    pub song_ids: Vec<SongId>,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub owner_id: ProfileId,
}
