//! URL slugs
//!
//! Slugs are cosmetic: routes always look entities up by id, and the slug
//! only makes the URL readable.

use unicode_normalization::UnicodeNormalization;

/// Lowercase, hyphen-joined form of `value`.
///
/// The input is NFKD-decomposed first so accented letters keep their base
/// letter ("Café" becomes "cafe"). ASCII letters, digits and underscores
/// are kept; runs of whitespace and hyphens collapse to a single hyphen;
/// whatever is left, combining marks included, is dropped. Leading and
/// trailing hyphens and underscores are trimmed.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for c in value
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
    {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
