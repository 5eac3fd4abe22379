//! Storage trait for the catalog
//!
//! The access engine and the aggregator never talk to a database; request
//! handlers resolve records through this trait and pass them in.

use crate::error::Result;
use crate::roles::Role;
use crate::types::{
    Account, AccountId, Album, AlbumFormat, AlbumId, AlbumInput, CatalogCounts, Comment,
    CreateAccount, CreateComment, CreatePlaylist, CreateProfile, CreateRating, Playlist,
    PlaylistId, Profile, ProfileId, Rating, Registration, Song, SongId, SongInput,
};
use async_trait::async_trait;

/// Access to persisted catalog data
///
/// Implementations enforce the uniqueness constraints themselves and report
/// violations as `DottifyError::Conflict`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // Accounts & profiles
    // ========================================================================

    /// Create a login account
    async fn create_account(&self, account: CreateAccount) -> Result<Account>;

    /// Get account by ID
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>>;

    /// Find account by username
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Get all accounts
    async fn get_all_accounts(&self) -> Result<Vec<Account>>;

    /// Add the account to a role group (idempotent)
    async fn grant_role(&self, account_id: AccountId, role: Role) -> Result<()>;

    /// Roles held by an account
    async fn get_roles(&self, account_id: AccountId) -> Result<Vec<Role>>;

    /// Create the profile for an account
    async fn create_profile(&self, profile: CreateProfile) -> Result<Profile>;

    /// Get profile by ID
    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>>;

    /// Get the profile belonging to an account
    async fn get_profile_by_account(&self, account_id: AccountId) -> Result<Option<Profile>>;

    /// Create an account, grant its roles and create its profile atomically
    async fn register(&self, registration: Registration) -> Result<(Account, Profile)>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// Get all albums
    async fn get_all_albums(&self) -> Result<Vec<Album>>;

    /// Get album by ID
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Albums owned by a profile
    async fn get_albums_by_owner(&self, owner: ProfileId) -> Result<Vec<Album>>;

    /// Albums whose title contains `query`, case-insensitively
    async fn search_albums(&self, query: &str) -> Result<Vec<Album>>;

    /// Id of another album with the same (title, artist name, format), if any
    async fn find_duplicate_album(
        &self,
        title: &str,
        artist_name: &str,
        format: Option<AlbumFormat>,
        excluding: Option<AlbumId>,
    ) -> Result<Option<AlbumId>>;

    /// Create an album; the slug is derived from the title
    async fn create_album(&self, album: AlbumInput, owner: Option<ProfileId>) -> Result<Album>;

    /// Replace an album's writable fields; the slug is derived again
    async fn update_album(&self, id: AlbumId, album: AlbumInput) -> Result<Album>;

    /// Delete an album and, with it, its songs
    async fn delete_album(&self, id: AlbumId) -> Result<()>;

    // ========================================================================
    // Songs
    // ========================================================================

    /// Get all songs
    async fn get_all_songs(&self) -> Result<Vec<Song>>;

    /// Get song by ID
    async fn get_song(&self, id: SongId) -> Result<Option<Song>>;

    /// Songs on an album, in position order
    async fn get_songs_by_album(&self, album_id: AlbumId) -> Result<Vec<Song>>;

    /// Whether another song on `album_id` already has `title`
    async fn song_title_taken(
        &self,
        album_id: AlbumId,
        title: &str,
        excluding: Option<SongId>,
    ) -> Result<bool>;

    /// Create a song at the next position on its album
    async fn create_song(&self, song: SongInput) -> Result<Song>;

    /// Replace a song's writable fields; position is kept
    async fn update_song(&self, id: SongId, song: SongInput) -> Result<Song>;

    /// Delete a song
    async fn delete_song(&self, id: SongId) -> Result<()>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get all playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>>;

    /// Playlists with Public visibility
    async fn get_public_playlists(&self) -> Result<Vec<Playlist>>;

    /// Get playlist by ID
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Playlists owned by a profile
    async fn get_playlists_by_owner(&self, owner: ProfileId) -> Result<Vec<Playlist>>;

    /// Create a playlist; `created_at` is set now
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Add a song to a playlist (idempotent)
    async fn add_song_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<()>;

    // ========================================================================
    // Ratings & comments
    // ========================================================================

    /// Record a rating; `created_at` is set now
    async fn create_rating(&self, rating: CreateRating) -> Result<Rating>;

    /// Ratings for an album
    async fn get_ratings_by_album(&self, album_id: AlbumId) -> Result<Vec<Rating>>;

    /// Record a comment
    async fn create_comment(&self, comment: CreateComment) -> Result<Comment>;

    /// Comments on an album with their authors' display names
    async fn get_comments_by_album(&self, album_id: AlbumId) -> Result<Vec<Comment>>;

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Raw figures for the statistics aggregator
    async fn catalog_counts(&self) -> Result<CatalogCounts>;
}
