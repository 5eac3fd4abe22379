use crate::{
    accounts, albums, comments, create_pool, playlists, profiles, ratings, run_migrations, songs,
    statistics, StorageError,
};
use async_trait::async_trait;
use dottify_core::{error::Result, storage::CatalogStore, types::*, Role};
use sqlx::SqlitePool;

/// Catalog store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and bring the schema up to date
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Password hash for login; kept off the trait so it never leaves storage
    /// except for verification
    pub async fn get_password_hash(&self, account_id: AccountId) -> Result<Option<String>> {
        accounts::get_password_hash(&self.pool, account_id).await
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    // Accounts & profiles
    async fn create_account(&self, account: CreateAccount) -> Result<Account> {
        accounts::create(&self.pool, account).await
    }

    async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        accounts::get_by_id(&self.pool, id).await
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        accounts::find_by_username(&self.pool, username).await
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>> {
        accounts::get_all(&self.pool).await
    }

    async fn grant_role(&self, account_id: AccountId, role: Role) -> Result<()> {
        accounts::grant_role(&self.pool, account_id, role).await
    }

    async fn get_roles(&self, account_id: AccountId) -> Result<Vec<Role>> {
        accounts::get_roles(&self.pool, account_id).await
    }

    async fn create_profile(&self, profile: CreateProfile) -> Result<Profile> {
        profiles::create(&self.pool, profile).await
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
        profiles::get_by_id(&self.pool, id).await
    }

    async fn get_profile_by_account(&self, account_id: AccountId) -> Result<Option<Profile>> {
        profiles::get_by_account(&self.pool, account_id).await
    }

    async fn register(&self, registration: Registration) -> Result<(Account, Profile)> {
        accounts::register(&self.pool, registration).await
    }

    // Albums
    async fn get_all_albums(&self) -> Result<Vec<Album>> {
        albums::get_all(&self.pool).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn get_albums_by_owner(&self, owner: ProfileId) -> Result<Vec<Album>> {
        albums::get_by_owner(&self.pool, owner).await
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<Album>> {
        albums::search(&self.pool, query).await
    }

    async fn find_duplicate_album(
        &self,
        title: &str,
        artist_name: &str,
        format: Option<AlbumFormat>,
        excluding: Option<AlbumId>,
    ) -> Result<Option<AlbumId>> {
        albums::find_duplicate(&self.pool, title, artist_name, format, excluding).await
    }

    async fn create_album(&self, album: AlbumInput, owner: Option<ProfileId>) -> Result<Album> {
        albums::create(&self.pool, album, owner).await
    }

    async fn update_album(&self, id: AlbumId, album: AlbumInput) -> Result<Album> {
        albums::update(&self.pool, id, album).await
    }

    async fn delete_album(&self, id: AlbumId) -> Result<()> {
        albums::delete(&self.pool, id).await
    }

    // Songs
    async fn get_all_songs(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    async fn get_song(&self, id: SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn get_songs_by_album(&self, album_id: AlbumId) -> Result<Vec<Song>> {
        songs::get_by_album(&self.pool, album_id).await
    }

    async fn song_title_taken(
        &self,
        album_id: AlbumId,
        title: &str,
        excluding: Option<SongId>,
    ) -> Result<bool> {
        songs::title_taken(&self.pool, album_id, title, excluding).await
    }

    async fn create_song(&self, song: SongInput) -> Result<Song> {
        songs::create(&self.pool, song).await
    }

    async fn update_song(&self, id: SongId, song: SongInput) -> Result<Song> {
        songs::update(&self.pool, id, song).await
    }

    async fn delete_song(&self, id: SongId) -> Result<()> {
        songs::delete(&self.pool, id).await
    }

    // Playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn get_public_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_public(&self.pool).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlists_by_owner(&self, owner: ProfileId) -> Result<Vec<Playlist>> {
        playlists::get_by_owner(&self.pool, owner).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn add_song_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<()> {
        playlists::add_song(&self.pool, playlist_id, song_id).await
    }

    // Ratings & comments
    async fn create_rating(&self, rating: CreateRating) -> Result<Rating> {
        ratings::create(&self.pool, rating).await
    }

    async fn get_ratings_by_album(&self, album_id: AlbumId) -> Result<Vec<Rating>> {
        ratings::get_by_album(&self.pool, album_id).await
    }

    async fn create_comment(&self, comment: CreateComment) -> Result<Comment> {
        comments::create(&self.pool, comment).await
    }

    async fn get_comments_by_album(&self, album_id: AlbumId) -> Result<Vec<Comment>> {
        comments::get_by_album(&self.pool, album_id).await
    }

    // Statistics
    async fn catalog_counts(&self) -> Result<CatalogCounts> {
        statistics::catalog_counts(&self.pool).await
    }
}
