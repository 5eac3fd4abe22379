//! Field-level validation rules
//!
//! Each rule checks one value and reports a [`FieldError`]. The `*Draft`
//! types carry raw submitted text (from JSON or an HTML form), run every
//! rule, and either produce a typed input or a [`ValidationErrors`] naming
//! all offending fields at once.
//!
//! Uniqueness is not checked here; it needs the store (see
//! `CatalogStore::find_duplicate_album` and the store's own constraints).

use crate::error::{DottifyError, FieldError, Result, ValidationErrors, Violation};
use crate::types::{AlbumFormat, AlbumId, AlbumInput, Price, SongInput, Stars};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Longest accepted title, name or comment
pub const MAX_TEXT_LENGTH: usize = 800;

/// How far past today a release date may lie
pub const RELEASE_WINDOW_DAYS: i64 = 180;

pub const MIN_RETAIL_PRICE: Price = Price::from_scaled(0);
pub const MAX_RETAIL_PRICE: Price = Price::from_scaled(99_999);

/// Shortest accepted song, in seconds
pub const MIN_SONG_LENGTH: i64 = 10;

pub const MIN_STARS: Stars = Stars::from_scaled(0);
pub const MAX_STARS: Stars = Stars::from_scaled(50);

fn field_error(field: &str, kind: Violation, message: impl Into<String>) -> FieldError {
    FieldError {
        field: field.to_string(),
        kind,
        message: message.into(),
    }
}

/// Release date must not be later than `today + 180 days`; there is no lower bound.
pub fn validate_release_date(date: NaiveDate, today: NaiveDate) -> std::result::Result<(), FieldError> {
    if date > today + Duration::days(RELEASE_WINDOW_DAYS) {
        return Err(field_error(
            "release_date",
            Violation::OutOfRange,
            format!("Release date cannot be more than {RELEASE_WINDOW_DAYS} days in the future."),
        ));
    }
    Ok(())
}

/// Price must lie in `0.00..=999.99`
pub fn validate_retail_price(price: Price) -> std::result::Result<(), FieldError> {
    if price < MIN_RETAIL_PRICE || price > MAX_RETAIL_PRICE {
        return Err(field_error(
            "retail_price",
            Violation::OutOfRange,
            format!("Price must be between {MIN_RETAIL_PRICE} and {MAX_RETAIL_PRICE}."),
        ));
    }
    Ok(())
}

/// Songs are at least ten seconds long
pub fn validate_song_length(length: i64) -> std::result::Result<(), FieldError> {
    if length < MIN_SONG_LENGTH {
        return Err(field_error(
            "length",
            Violation::OutOfRange,
            format!("Ensure this value is greater than or equal to {MIN_SONG_LENGTH}."),
        ));
    }
    Ok(())
}

/// Stars lie in `0.0..=5.0` and land on a half point
pub fn validate_stars(stars: Stars) -> std::result::Result<(), FieldError> {
    if stars < MIN_STARS || stars > MAX_STARS {
        return Err(field_error(
            "stars",
            Violation::OutOfRange,
            format!("Stars must be between {MIN_STARS} and {MAX_STARS}."),
        ));
    }
    // tenths: a half point is a multiple of 5
    if stars.scaled() % 5 != 0 {
        return Err(field_error(
            "stars",
            Violation::Granularity,
            "Stars must be in increments of 0.5.",
        ));
    }
    Ok(())
}

/// Non-blank text of at most 800 characters
pub fn validate_text(field: &str, value: &str) -> std::result::Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error(field, Violation::Required, "This field is required."));
    }
    let length = value.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(field_error(
            field,
            Violation::TooLong,
            format!("Ensure this value has at most {MAX_TEXT_LENGTH} characters (it has {length})."),
        ));
    }
    Ok(())
}

/// Accept strings, numbers, booleans and null as raw text
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn required<'a>(errors: &mut ValidationErrors, field: &str, value: &'a str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, Violation::Required, "This field is required.");
        None
    } else {
        Some(value)
    }
}

/// Raw album submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub retail_price: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub format: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub release_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover_image: String,
}

impl AlbumDraft {
    /// Run every album rule against `today`'s date
    pub fn validate(&self, today: NaiveDate) -> Result<AlbumInput> {
        let mut errors = ValidationErrors::default();

        errors.check(validate_text("title", &self.title));
        errors.check(validate_text("artist_name", &self.artist_name));

        let retail_price = required(&mut errors, "retail_price", &self.retail_price).and_then(|raw| {
            match raw.parse::<Price>() {
                Ok(price) => {
                    errors.check(validate_retail_price(price));
                    Some(price)
                }
                Err(e) => {
                    errors.push("retail_price", Violation::Invalid, e.to_string());
                    None
                }
            }
        });

        let format = match self.format.trim() {
            "" => None,
            code => match code.parse::<AlbumFormat>() {
                Ok(format) => Some(format),
                Err(message) => {
                    errors.push("format", Violation::Invalid, message);
                    None
                }
            },
        };

        let release_date = required(&mut errors, "release_date", &self.release_date).and_then(|raw| {
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => {
                    errors.check(validate_release_date(date, today));
                    Some(date)
                }
                Err(_) => {
                    errors.push("release_date", Violation::Invalid, "Enter a valid date.");
                    None
                }
            }
        });

        let cover_image = match self.cover_image.trim() {
            "" => None,
            path => Some(path.to_string()),
        };

        match (retail_price, release_date) {
            (Some(retail_price), Some(release_date)) if errors.is_empty() => Ok(AlbumInput {
                title: self.title.trim().to_string(),
                artist_name: self.artist_name.trim().to_string(),
                retail_price,
                format,
                release_date,
                cover_image,
            }),
            _ => Err(DottifyError::Validation(errors)),
        }
    }
}

/// Raw song submission. `album` is the target album id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub length: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub album: String,
}

impl SongDraft {
    pub fn validate(&self) -> Result<SongInput> {
        let mut errors = ValidationErrors::default();

        errors.check(validate_text("title", &self.title));

        let length = required(&mut errors, "length", &self.length).and_then(|raw| {
            match raw.parse::<i64>() {
                Ok(length) => {
                    errors.check(validate_song_length(length));
                    Some(length)
                }
                Err(_) => {
                    errors.push("length", Violation::Invalid, "Enter a whole number.");
                    None
                }
            }
        });

        let album_id = required(&mut errors, "album", &self.album).and_then(|raw| {
            match raw.parse::<AlbumId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("album", Violation::Invalid, "Select a valid album.");
                    None
                }
            }
        });

        match (length, album_id) {
            (Some(length), Some(album_id)) if errors.is_empty() => Ok(SongInput {
                title: self.title.trim().to_string(),
                length,
                album_id,
            }),
            _ => Err(DottifyError::Validation(errors)),
        }
    }
}

/// Raw rating submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub stars: String,
}

impl RatingDraft {
    pub fn validate(&self) -> Result<Stars> {
        let mut errors = ValidationErrors::default();
        let stars = required(&mut errors, "stars", &self.stars).and_then(|raw| {
            match raw.parse::<Stars>() {
                Ok(stars) => {
                    errors.check(validate_stars(stars));
                    Some(stars)
                }
                Err(e) => {
                    errors.push("stars", Violation::Invalid, e.to_string());
                    None
                }
            }
        });
        match stars {
            Some(stars) if errors.is_empty() => Ok(stars),
            _ => Err(DottifyError::Validation(errors)),
        }
    }
}

/// Raw comment submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default, deserialize_with = "lenient_text")]
    pub comment_text: String,
}

impl CommentDraft {
    pub fn validate(&self) -> Result<String> {
        let mut errors = ValidationErrors::default();
        errors.check(validate_text("comment_text", &self.comment_text));
        errors.into_result()?;
        Ok(self.comment_text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn album_draft() -> AlbumDraft {
        AlbumDraft {
            title: "Album".to_string(),
            artist_name: "Artist".to_string(),
            retail_price: "5.00".to_string(),
            format: "SNGL".to_string(),
            release_date: "2025-01-01".to_string(),
            cover_image: String::new(),
        }
    }

    fn violations(err: DottifyError) -> ValidationErrors {
        match err {
            DottifyError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn release_date_window_is_inclusive_at_180_days() {
        let today = today();
        assert!(validate_release_date(today + Duration::days(180), today).is_ok());
        let err = validate_release_date(today + Duration::days(181), today).unwrap_err();
        assert_eq!(err.kind, Violation::OutOfRange);
        // no lower bound
        assert!(validate_release_date(NaiveDate::from_ymd_opt(1950, 6, 1).unwrap(), today).is_ok());
    }

    #[test]
    fn retail_price_bounds() {
        assert!(validate_retail_price("0.00".parse().unwrap()).is_ok());
        assert!(validate_retail_price("999.99".parse().unwrap()).is_ok());
        assert!(validate_retail_price("1000.00".parse().unwrap()).is_err());
        assert!(validate_retail_price("-1".parse().unwrap()).is_err());
    }

    #[test]
    fn song_length_minimum() {
        assert!(validate_song_length(10).is_ok());
        assert_eq!(validate_song_length(9).unwrap_err().kind, Violation::OutOfRange);
    }

    #[test]
    fn stars_range_then_granularity() {
        assert!(validate_stars("2.5".parse().unwrap()).is_ok());
        assert!(validate_stars("0.0".parse().unwrap()).is_ok());
        assert!(validate_stars("5.0".parse().unwrap()).is_ok());
        assert_eq!(
            validate_stars("5.5".parse().unwrap()).unwrap_err().kind,
            Violation::OutOfRange
        );
        assert_eq!(
            validate_stars("3.3".parse().unwrap()).unwrap_err().kind,
            Violation::Granularity
        );
    }

    #[test]
    fn text_required_and_bounded() {
        assert_eq!(validate_text("title", "   ").unwrap_err().kind, Violation::Required);
        assert!(validate_text("title", &"x".repeat(800)).is_ok());
        assert_eq!(
            validate_text("title", &"x".repeat(801)).unwrap_err().kind,
            Violation::TooLong
        );
    }

    #[test]
    fn valid_album_draft_produces_input() {
        let input = album_draft().validate(today()).unwrap();
        assert_eq!(input.title, "Album");
        assert_eq!(input.retail_price.to_string(), "5.00");
        assert_eq!(input.format, Some(AlbumFormat::Single));
        assert_eq!(input.cover_image, None);
    }

    #[test]
    fn blank_format_means_no_format() {
        let mut draft = album_draft();
        draft.format = String::new();
        assert_eq!(draft.validate(today()).unwrap().format, None);
    }

    #[test]
    fn album_draft_reports_every_bad_field() {
        let draft = AlbumDraft {
            title: String::new(),
            artist_name: "Artist".to_string(),
            retail_price: "1000.00".to_string(),
            format: "ALBM".to_string(),
            release_date: "2026-01-01".to_string(),
            cover_image: String::new(),
        };
        let errors = violations(draft.validate(today()).unwrap_err());
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "retail_price", "format", "release_date"]);
    }

    #[test]
    fn album_draft_accepts_json_numbers() {
        let draft: AlbumDraft = serde_json::from_value(serde_json::json!({
            "title": "Numbers",
            "artist_name": "Artist",
            "retail_price": 12.5,
            "release_date": "2024-05-01",
            "format": null,
        }))
        .unwrap();
        let input = draft.validate(today()).unwrap();
        assert_eq!(input.retail_price.scaled(), 1250);
        assert_eq!(input.format, None);
    }

    #[test]
    fn song_draft_rules() {
        let draft = SongDraft {
            title: "Song".to_string(),
            length: "9".to_string(),
            album: "x".to_string(),
        };
        let errors = violations(draft.validate().unwrap_err());
        assert_eq!(errors.for_field("length").count(), 1);
        assert_eq!(errors.for_field("album").count(), 1);

        let ok = SongDraft {
            title: "Song".to_string(),
            length: "10".to_string(),
            album: "3".to_string(),
        };
        assert_eq!(
            ok.validate().unwrap(),
            SongInput {
                title: "Song".to_string(),
                length: 10,
                album_id: 3
            }
        );
    }

    #[test]
    fn rating_draft_rules() {
        let ok = RatingDraft { stars: "2.5".to_string() };
        assert_eq!(ok.validate().unwrap().to_string(), "2.5");

        let too_precise = RatingDraft { stars: "3.33".to_string() };
        let errors = violations(too_precise.validate().unwrap_err());
        assert_eq!(errors.errors()[0].kind, Violation::Invalid);

        let off_step = RatingDraft { stars: "3.3".to_string() };
        let errors = violations(off_step.validate().unwrap_err());
        assert_eq!(errors.errors()[0].kind, Violation::Granularity);
    }

    #[test]
    fn comment_draft_length_limit() {
        let long = CommentDraft {
            comment_text: "a".repeat(801),
        };
        assert!(long.validate().is_err());
        let ok = CommentDraft {
            comment_text: "Great record".to_string(),
        };
        assert_eq!(ok.validate().unwrap(), "Great record");
    }
}
