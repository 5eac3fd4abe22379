//! Fixed-point decimal values
//!
//! Prices and star ratings are decimal quantities with a fixed number of
//! fractional digits. They are held as scaled integers so that range and
//! step checks are exact.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a decimal literal was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalParseError {
    /// Not a decimal number
    #[error("Enter a number.")]
    Malformed,
    /// More fractional digits than the field stores
    #[error("Ensure that there are no more than {places} decimal places.")]
    TooPrecise { places: u32 },
}

/// Parse `text` into an integer scaled by `10^places`.
///
/// Trailing fractional zeros beyond `places` are accepted ("5.000" at two
/// places is 500); any other extra digit is rejected.
pub fn parse_scaled(text: &str, places: u32) -> Result<i64, DecimalParseError> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(DecimalParseError::Malformed);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalParseError::Malformed);
    }

    let significant = frac.trim_end_matches('0');
    if significant.len() > places as usize {
        return Err(DecimalParseError::TooPrecise { places });
    }

    let scale = 10_i64.pow(places);
    let whole_value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| DecimalParseError::Malformed)?
    };
    let mut frac_value: i64 = 0;
    for (i, b) in significant.bytes().enumerate() {
        frac_value += i64::from(b - b'0') * 10_i64.pow(places - 1 - i as u32);
    }

    let value = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(DecimalParseError::Malformed)?;
    Ok(if negative { -value } else { value })
}

fn format_scaled(value: i64, places: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let scale = 10_i64.pow(places);
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = scale.unsigned_abs();
    write!(
        f,
        "{sign}{}.{:0width$}",
        abs / scale,
        abs % scale,
        width = places as usize
    )
}

/// Accepts a JSON string (`"5.00"`) or number (`5`, `5.5`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawDecimal {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(x) => x.to_string(),
        }
    }
}

macro_rules! fixed_point {
    ($(#[$meta:meta])* $name:ident, $places:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Number of fractional digits stored
            pub const PLACES: u32 = $places;

            /// Build from the scaled integer representation
            pub const fn from_scaled(value: i64) -> Self {
                Self(value)
            }

            /// The scaled integer representation
            pub const fn scaled(self) -> i64 {
                self.0
            }

            pub fn to_f64(self) -> f64 {
                self.0 as f64 / 10_i64.pow(Self::PLACES) as f64
            }
        }

        impl FromStr for $name {
            type Err = DecimalParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_scaled(s, Self::PLACES).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                format_scaled(self.0, Self::PLACES, f)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = RawDecimal::deserialize(deserializer)?;
                raw.into_text().parse().map_err(de::Error::custom)
            }
        }
    };
}

fixed_point!(
    /// Retail price with two decimal places, held in cents
    Price,
    2
);

fixed_point!(
    /// Rating stars with one decimal place, held in tenths
    Stars,
    1
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prices() {
        assert_eq!("5.00".parse::<Price>().unwrap().scaled(), 500);
        assert_eq!("999.99".parse::<Price>().unwrap().scaled(), 99_999);
        assert_eq!("-1".parse::<Price>().unwrap().scaled(), -100);
        assert_eq!(".5".parse::<Price>().unwrap().scaled(), 50);
        assert_eq!("5.000".parse::<Price>().unwrap().scaled(), 500);
    }

    #[test]
    fn rejects_bad_literals() {
        assert_eq!("abc".parse::<Price>(), Err(DecimalParseError::Malformed));
        assert_eq!("".parse::<Price>(), Err(DecimalParseError::Malformed));
        assert_eq!("1.2.3".parse::<Price>(), Err(DecimalParseError::Malformed));
        assert_eq!(
            "3.33".parse::<Stars>(),
            Err(DecimalParseError::TooPrecise { places: 1 })
        );
    }

    #[test]
    fn parse_errors_read_as_form_messages() {
        assert_eq!(DecimalParseError::Malformed.to_string(), "Enter a number.");
        assert_eq!(
            "3.33".parse::<Stars>().unwrap_err().to_string(),
            "Ensure that there are no more than 1 decimal places."
        );
    }

    #[test]
    fn displays_fixed_places() {
        assert_eq!(Price::from_scaled(500).to_string(), "5.00");
        assert_eq!(Price::from_scaled(5).to_string(), "0.05");
        assert_eq!(Price::from_scaled(-150).to_string(), "-1.50");
        assert_eq!(Stars::from_scaled(25).to_string(), "2.5");
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let p: Price = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(p.scaled(), 1250);
        let p: Price = serde_json::from_str("7").unwrap();
        assert_eq!(p.scaled(), 700);
        let s: Stars = serde_json::from_str("2.5").unwrap();
        assert_eq!(s.scaled(), 25);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"2.5\"");
    }
}
