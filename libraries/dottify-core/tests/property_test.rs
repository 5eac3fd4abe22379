//! Property-based tests for catalog rules
//!
//! Uses proptest to check slug shape and the numeric validation boundaries
//! across many random inputs.

use chrono::{Duration, NaiveDate};
use dottify_core::slug::slugify;
use dottify_core::types::{Price, Stars};
use dottify_core::validation::{
    validate_release_date, validate_retail_price, validate_song_length, validate_stars,
};
use proptest::prelude::*;

proptest! {
    /// Property: a slug only ever contains lowercase ASCII, digits, `_` and single inner hyphens
    #[test]
    fn slug_is_url_safe(title in ".{0,80}") {
        let slug = slugify(&title);
        prop_assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }

    /// Property: slugging is idempotent
    #[test]
    fn slug_is_idempotent(title in "[A-Za-z0-9 _!?'-]{0,60}") {
        let once = slugify(&title);
        prop_assert_eq!(slugify(&once), once);
    }

    /// Property: prices are valid exactly inside 0.00..=999.99
    #[test]
    fn price_bounds(cents in -200_000i64..200_000) {
        let valid = validate_retail_price(Price::from_scaled(cents)).is_ok();
        prop_assert_eq!(valid, (0..=99_999).contains(&cents));
    }

    /// Property: stars are valid exactly on half points inside 0.0..=5.0
    #[test]
    fn stars_half_points(tenths in -100i64..100) {
        let valid = validate_stars(Stars::from_scaled(tenths)).is_ok();
        prop_assert_eq!(valid, (0..=50).contains(&tenths) && tenths % 5 == 0);
    }

    /// Property: release dates are valid up to and including 180 days ahead
    #[test]
    fn release_window(offset in -3650i64..3650) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let valid = validate_release_date(today + Duration::days(offset), today).is_ok();
        prop_assert_eq!(valid, offset <= 180);
    }

    /// Property: song lengths below ten seconds are always rejected
    #[test]
    fn song_length_floor(length in -100i64..1000) {
        prop_assert_eq!(validate_song_length(length).is_ok(), length >= 10);
    }
}
