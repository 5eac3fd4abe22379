//! Dottify Core
//!
//! Platform-agnostic domain types, rules and traits for the Dottify music
//! catalog.
//!
//! This crate holds everything that decides *what is allowed* and *what a
//! number means*, without touching a database or a socket:
//!
//! - **Domain Types**: `Album`, `Song`, `Playlist`, `Profile`, `Rating`, `Comment`
//! - **Validation**: field-level invariants (`validation`)
//! - **Access**: role model and the visibility & ownership engine (`roles`, `access`)
//! - **Statistics**: catalog-wide and per-album aggregates (`stats`)
//! - **Storage**: the `CatalogStore` trait implemented by `dottify-storage`
//!
//! # Example
//!
//! ```rust
//! use dottify_core::{access, Actor, Role};
//!
//! let artist = Actor::member(1, Some(10), [Role::Artist]);
//! let scope = access::home_scope(&artist);
//! assert!(scope.songs.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod error;
pub mod roles;
pub mod slug;
pub mod stats;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{DottifyError, FieldError, Result, ValidationErrors, Violation};
pub use roles::{Actor, Role};
pub use storage::CatalogStore;
pub use types::{
    Account, AccountId, Album, AlbumFormat, AlbumId, AlbumInput, CatalogCounts, Comment,
    CommentId, CreateAccount, CreateComment, CreatePlaylist, CreateProfile, CreateRating,
    Playlist, PlaylistId, Price, Profile, ProfileId, Rating, RatingId, Registration, Song, SongId,
    SongInput,
    Stars, Visibility, NO_COVER_IMAGE,
};
