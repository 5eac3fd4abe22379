//! Album types

use super::decimal::Price;
use super::ids::{AlbumId, ProfileId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cover image used when an album has none of its own
pub const NO_COVER_IMAGE: &str = "no_cover.jpg";

/// Release format of an album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlbumFormat {
    #[serde(rename = "SNGL")]
    Single,
    #[serde(rename = "RMST")]
    Remaster,
    #[serde(rename = "DLUX")]
    Deluxe,
    #[serde(rename = "COMP")]
    Compilation,
    #[serde(rename = "LIVE")]
    Live,
}

impl AlbumFormat {
    pub const ALL: [AlbumFormat; 5] = [
        AlbumFormat::Single,
        AlbumFormat::Remaster,
        AlbumFormat::Deluxe,
        AlbumFormat::Compilation,
        AlbumFormat::Live,
    ];

    /// Four-letter code used in storage and payloads
    pub fn code(&self) -> &'static str {
        match self {
            AlbumFormat::Single => "SNGL",
            AlbumFormat::Remaster => "RMST",
            AlbumFormat::Deluxe => "DLUX",
            AlbumFormat::Compilation => "COMP",
            AlbumFormat::Live => "LIVE",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AlbumFormat::Single => "Single",
            AlbumFormat::Remaster => "Remaster",
            AlbumFormat::Deluxe => "Deluxe Edition",
            AlbumFormat::Compilation => "Compilation",
            AlbumFormat::Live => "Live Recording",
        }
    }
}

impl FromStr for AlbumFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlbumFormat::ALL
            .into_iter()
            .find(|f| f.code() == s)
            .ok_or_else(|| format!("Select a valid choice. {s} is not one of the available choices."))
    }
}

impl fmt::Display for AlbumFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_name: String,
    /// Owning artist profile, if any
    pub artist_account: Option<ProfileId>,
    pub retail_price: Price,
    pub format: Option<AlbumFormat>,
    pub release_date: NaiveDate,
    /// Derived from `title` on every save
    pub slug: String,
    pub cover_image: String,
}

/// Writable album fields, already validated.
///
/// Neither the slug nor the owning profile is part of this: the slug is
/// derived by the store and the owner is decided by the access engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumInput {
    pub title: String,
    pub artist_name: String,
    pub retail_price: Price,
    pub format: Option<AlbumFormat>,
    pub release_date: NaiveDate,
    pub cover_image: Option<String>,
}
