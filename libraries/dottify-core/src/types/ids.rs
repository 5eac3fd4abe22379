//! Entity identifiers
//!
//! Every entity is keyed by a database row id. The aliases keep signatures
//! readable without a newtype per table.

pub type AccountId = i64;
pub type ProfileId = i64;
pub type AlbumId = i64;
pub type SongId = i64;
pub type PlaylistId = i64;
pub type RatingId = i64;
pub type CommentId = i64;
