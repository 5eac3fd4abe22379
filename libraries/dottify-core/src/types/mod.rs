mod account;
mod album;
mod comment;
mod decimal;
mod ids;
mod playlist;
mod rating;
mod song;
mod statistics;

pub use account::{Account, CreateAccount, CreateProfile, Profile, Registration};
pub use album::{Album, AlbumFormat, AlbumInput, NO_COVER_IMAGE};
pub use comment::{Comment, CreateComment};
pub use decimal::{parse_scaled, DecimalParseError, Price, Stars};
pub use ids::{AccountId, AlbumId, CommentId, PlaylistId, ProfileId, RatingId, SongId};
pub use playlist::{CreatePlaylist, Playlist, Visibility};
pub use rating::{CreateRating, Rating};
pub use song::{Song, SongInput};
pub use statistics::CatalogCounts;
