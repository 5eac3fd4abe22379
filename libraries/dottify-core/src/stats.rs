//! Statistics aggregator
//!
//! Aggregates are recomputed on every call from store snapshots; nothing
//! is cached.

use crate::types::{CatalogCounts, Rating};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Trailing window for the "recent" rating average
pub const RECENT_RATING_WINDOW_DAYS: i64 = 30;

/// Catalog-wide figures served by the statistics endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStatistics {
    pub user_count: i64,
    pub album_count: i64,
    /// Public playlists only
    pub playlist_count: i64,
    /// Mean song length in seconds, 0 when there are no songs
    pub song_length_average: f64,
}

impl CatalogStatistics {
    pub fn from_counts(counts: &CatalogCounts) -> Self {
        let song_length_average = if counts.songs > 0 {
            counts.total_song_length as f64 / counts.songs as f64
        } else {
            0.0
        };

        Self {
            user_count: counts.users,
            album_count: counts.albums,
            playlist_count: counts.public_playlists,
            song_length_average,
        }
    }
}

/// Rating averages shown on an album page, formatted to one decimal place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSummary {
    pub average_alltime_str: String,
    pub average_recent_str: String,
}

impl RatingSummary {
    /// Summarize one album's ratings as of `now`.
    ///
    /// A rating counts as recent when `created_at >= now - 30 days`.
    pub fn from_ratings(ratings: &[Rating], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(RECENT_RATING_WINDOW_DAYS);

        let alltime = mean(ratings.iter());
        let recent = mean(ratings.iter().filter(|r| r.created_at >= cutoff));

        Self {
            average_alltime_str: format_one_decimal(alltime),
            average_recent_str: format_one_decimal(recent),
        }
    }
}

fn mean<'a>(ratings: impl Iterator<Item = &'a Rating>) -> f64 {
    // sum in tenths to keep the addition exact
    let (total, count) = ratings.fold((0_i64, 0_i64), |(total, count), r| {
        (total + r.stars.scaled(), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        total as f64 / 10.0 / count as f64
    }
}

/// `3.0`, `2.5`, `0.0`
pub fn format_one_decimal(value: f64) -> String {
    format!("{value:.1}")
}
