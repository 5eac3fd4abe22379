//! Catalog service
//!
//! Every request-level operation runs the same pipeline: resolve the
//! records it touches through the store, ask the access engine, validate
//! the submission, check uniqueness, and only then write. Nothing is
//! persisted when any step before the write fails.

use chrono::{NaiveDate, Utc};
use dottify_core::{
    access::{self, AlbumScope, PlaylistScope, SongScope},
    stats::{CatalogStatistics, RatingSummary},
    validation::{AlbumDraft, CommentDraft, RatingDraft, SongDraft},
    Actor, Album, AlbumFormat, AlbumId, AlbumInput, CatalogStore, Comment, CreateComment,
    CreateRating, DottifyError, Playlist, PlaylistId, Profile, ProfileId, Rating, Result, Song,
    SongId, SongInput, Violation,
};
use serde::Serialize;
use std::sync::Arc;

/// What the home page lists; `None` sections are not shown at all
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub albums: Option<Vec<Album>>,
    pub playlists: Option<Vec<Playlist>>,
    pub songs: Option<Vec<Song>>,
}

#[derive(Debug, Serialize)]
pub struct AlbumDetail {
    pub album: Album,
    pub songs: Vec<Song>,
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub ratings: RatingSummary,
}

#[derive(Debug, Serialize)]
pub struct SongDetail {
    pub song: Song,
    pub album: Album,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub profile: Profile,
    pub playlists: Vec<Playlist>,
}

/// A playlist together with its owner's display name
#[derive(Debug)]
pub struct PlaylistListing {
    pub playlist: Playlist,
    pub owner_name: String,
}

#[derive(Debug, Serialize)]
pub struct FormatChoice {
    pub code: &'static str,
    pub label: &'static str,
}

/// Context for the album create/edit forms
#[derive(Debug, Serialize)]
pub struct AlbumForm {
    pub album: Option<Album>,
    pub format_choices: Vec<FormatChoice>,
}

/// Context for the song create/edit forms
#[derive(Debug, Serialize)]
pub struct SongForm {
    pub song: Option<Song>,
    /// Albums the actor may place a song on
    pub album_choices: Vec<Album>,
}

/// Orchestrates store lookups, access checks and validation
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn home(&self, actor: &Actor) -> Result<HomeView> {
        let scope = access::home_scope(actor);

        let albums = match scope.albums {
            None => None,
            Some(AlbumScope::All) => Some(self.store.get_all_albums().await?),
            Some(AlbumScope::OwnedBy(profile)) => {
                Some(self.store.get_albums_by_owner(profile).await?)
            }
            Some(AlbumScope::Empty) => Some(Vec::new()),
        };

        let playlists = match scope.playlists {
            None => None,
            Some(PlaylistScope::All) => Some(self.store.get_all_playlists().await?),
            Some(PlaylistScope::PublicOnly) => Some(self.store.get_public_playlists().await?),
            Some(PlaylistScope::OwnedBy(profile)) => {
                Some(self.store.get_playlists_by_owner(profile).await?)
            }
            Some(PlaylistScope::Empty) => Some(Vec::new()),
        };

        let songs = match scope.songs {
            None => None,
            Some(SongScope::All) => Some(self.store.get_all_songs().await?),
        };

        Ok(HomeView {
            albums,
            playlists,
            songs,
        })
    }

    /// Title search for logged-in actors; a blank query lists everything
    pub async fn search_albums(&self, actor: &Actor, query: &str) -> Result<Vec<Album>> {
        access::require_authenticated(actor)?;

        let query = query.trim();
        if query.is_empty() {
            self.store.get_all_albums().await
        } else {
            self.store.search_albums(query).await
        }
    }

    pub async fn albums(&self) -> Result<Vec<Album>> {
        self.store.get_all_albums().await
    }

    pub async fn album(&self, id: AlbumId) -> Result<Album> {
        self.store
            .get_album(id)
            .await?
            .ok_or_else(|| DottifyError::not_found("Album", id))
    }

    pub async fn album_songs(&self, album_id: AlbumId) -> Result<Vec<Song>> {
        self.store.get_songs_by_album(album_id).await
    }

    /// A song addressed through its album; songs on other albums are absent
    pub async fn album_song(&self, album_id: AlbumId, song_id: SongId) -> Result<Song> {
        match self.store.get_song(song_id).await? {
            Some(song) if song.album_id == album_id => Ok(song),
            _ => Err(DottifyError::not_found("Song", song_id)),
        }
    }

    pub async fn album_detail(&self, id: AlbumId) -> Result<AlbumDetail> {
        let album = self.album(id).await?;
        let songs = self.store.get_songs_by_album(id).await?;
        let comments = self.store.get_comments_by_album(id).await?;
        let ratings = self.store.get_ratings_by_album(id).await?;

        Ok(AlbumDetail {
            album,
            songs,
            comments,
            ratings: RatingSummary::from_ratings(&ratings, Utc::now()),
        })
    }

    pub async fn songs(&self) -> Result<Vec<Song>> {
        self.store.get_all_songs().await
    }

    pub async fn song(&self, id: SongId) -> Result<Song> {
        self.store
            .get_song(id)
            .await?
            .ok_or_else(|| DottifyError::not_found("Song", id))
    }

    pub async fn song_detail(&self, id: SongId) -> Result<SongDetail> {
        let song = self.song(id).await?;
        let album = self.album(song.album_id).await?;
        Ok(SongDetail { song, album })
    }

    pub async fn profile(&self, id: ProfileId) -> Result<Profile> {
        self.store
            .get_profile(id)
            .await?
            .ok_or_else(|| DottifyError::not_found("Profile", id))
    }

    /// A profile and the playlists `actor` may see on it
    pub async fn user_detail(&self, actor: &Actor, id: ProfileId) -> Result<UserDetail> {
        let profile = self.profile(id).await?;
        let playlists = self
            .store
            .get_playlists_by_owner(profile.id)
            .await?
            .into_iter()
            .filter(|p| access::can_view_on_profile(actor, p))
            .collect();

        Ok(UserDetail { profile, playlists })
    }

    pub async fn public_playlists(&self) -> Result<Vec<PlaylistListing>> {
        let playlists = self.store.get_public_playlists().await?;
        let mut listings = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            listings.push(self.with_owner(playlist).await?);
        }
        Ok(listings)
    }

    /// A Public playlist; any other visibility is reported as absent
    pub async fn public_playlist(&self, id: PlaylistId) -> Result<PlaylistListing> {
        match self.store.get_playlist(id).await? {
            Some(playlist) if access::is_publicly_listed(&playlist) => {
                self.with_owner(playlist).await
            }
            _ => Err(DottifyError::not_found("Playlist", id)),
        }
    }

    async fn with_owner(&self, playlist: Playlist) -> Result<PlaylistListing> {
        let owner = self.profile(playlist.owner_id).await?;
        Ok(PlaylistListing {
            playlist,
            owner_name: owner.display_name,
        })
    }

    pub async fn statistics(&self) -> Result<CatalogStatistics> {
        let counts = self.store.catalog_counts().await?;
        Ok(CatalogStatistics::from_counts(&counts))
    }

    // ========================================================================
    // Album writes
    // ========================================================================

    pub async fn album_form(&self, actor: &Actor, id: Option<AlbumId>) -> Result<AlbumForm> {
        guard(actor, "open album form", id, access::authorize_catalog_write(actor))?;

        let album = match id {
            Some(id) => {
                let album = self.album(id).await?;
                guard(actor, "edit album", Some(id), access::authorize_album_change(actor, &album))?;
                Some(album)
            }
            None => None,
        };

        Ok(AlbumForm {
            album,
            format_choices: AlbumFormat::ALL
                .iter()
                .map(|f| FormatChoice {
                    code: f.code(),
                    label: f.label(),
                })
                .collect(),
        })
    }

    /// Album shown on the delete confirmation page
    pub async fn album_for_delete(&self, actor: &Actor, id: AlbumId) -> Result<Album> {
        guard(actor, "delete album", Some(id), access::authorize_catalog_write(actor))?;
        let album = self.album(id).await?;
        guard(actor, "delete album", Some(id), access::authorize_album_change(actor, &album))?;
        Ok(album)
    }

    pub async fn create_album(&self, actor: &Actor, draft: &AlbumDraft) -> Result<Album> {
        let owner = guard(actor, "create album", None, access::authorize_album_create(actor))?;
        let input = draft.validate(Self::today())?;
        self.ensure_album_unique(&input, None).await?;

        let album = self.store.create_album(input, owner).await?;
        tracing::info!(album_id = album.id, owner = ?owner, "Album created");
        Ok(album)
    }

    pub async fn update_album(&self, actor: &Actor, id: AlbumId, draft: &AlbumDraft) -> Result<Album> {
        guard(actor, "edit album", Some(id), access::authorize_catalog_write(actor))?;
        let album = self.album(id).await?;
        guard(actor, "edit album", Some(id), access::authorize_album_change(actor, &album))?;

        let input = draft.validate(Self::today())?;
        self.ensure_album_unique(&input, Some(id)).await?;

        let album = self.store.update_album(id, input).await?;
        tracing::info!(album_id = id, "Album updated");
        Ok(album)
    }

    pub async fn delete_album(&self, actor: &Actor, id: AlbumId) -> Result<()> {
        self.album_for_delete(actor, id).await?;
        self.store.delete_album(id).await?;
        tracing::info!(album_id = id, "Album deleted");
        Ok(())
    }

    async fn ensure_album_unique(&self, input: &AlbumInput, excluding: Option<AlbumId>) -> Result<()> {
        let duplicate = self
            .store
            .find_duplicate_album(&input.title, &input.artist_name, input.format, excluding)
            .await?;
        match duplicate {
            Some(_) => Err(DottifyError::conflict(
                "Album with this Title, Artist name and Format already exists.",
            )),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Song writes
    // ========================================================================

    pub async fn song_form(&self, actor: &Actor, id: Option<SongId>) -> Result<SongForm> {
        guard(actor, "open song form", id, access::authorize_catalog_write(actor))?;

        let song = match id {
            Some(id) => {
                let song = self.song(id).await?;
                let album = self.album(song.album_id).await?;
                guard(actor, "edit song", Some(id), access::authorize_song_change(actor, &album))?;
                Some(song)
            }
            None => None,
        };

        let album_choices = if actor.is_admin() {
            self.store.get_all_albums().await?
        } else {
            match actor.profile_id() {
                Some(profile) => self.store.get_albums_by_owner(profile).await?,
                None => Vec::new(),
            }
        };

        Ok(SongForm {
            song,
            album_choices,
        })
    }

    /// Song shown on the delete confirmation page
    pub async fn song_for_delete(&self, actor: &Actor, id: SongId) -> Result<Song> {
        guard(actor, "delete song", Some(id), access::authorize_catalog_write(actor))?;
        let song = self.song(id).await?;
        let album = self.album(song.album_id).await?;
        guard(actor, "delete song", Some(id), access::authorize_song_change(actor, &album))?;
        Ok(song)
    }

    pub async fn create_song(&self, actor: &Actor, draft: &SongDraft) -> Result<Song> {
        guard(actor, "create song", None, access::authorize_catalog_write(actor))?;
        let input = draft.validate()?;
        let album = self.album_choice(input.album_id).await?;
        guard(
            actor,
            "create song",
            Some(album.id),
            access::authorize_song_create(actor, &album),
        )?;
        self.ensure_song_unique(&input, None).await?;

        let song = self.store.create_song(input).await?;
        tracing::info!(song_id = song.id, album_id = song.album_id, position = song.position, "Song created");
        Ok(song)
    }

    pub async fn update_song(&self, actor: &Actor, id: SongId, draft: &SongDraft) -> Result<Song> {
        guard(actor, "edit song", Some(id), access::authorize_catalog_write(actor))?;
        let song = self.song(id).await?;
        let current = self.album(song.album_id).await?;
        guard(actor, "edit song", Some(id), access::authorize_song_change(actor, &current))?;

        let input = draft.validate()?;
        let target = if input.album_id == current.id {
            current
        } else {
            self.album_choice(input.album_id).await?
        };
        guard(actor, "move song", Some(id), access::authorize_song_move(actor, &target))?;
        self.ensure_song_unique(&input, Some(id)).await?;

        let song = self.store.update_song(id, input).await?;
        tracing::info!(song_id = id, album_id = song.album_id, "Song updated");
        Ok(song)
    }

    pub async fn delete_song(&self, actor: &Actor, id: SongId) -> Result<()> {
        self.song_for_delete(actor, id).await?;
        self.store.delete_song(id).await?;
        tracing::info!(song_id = id, "Song deleted");
        Ok(())
    }

    /// The album a submitted song points at; a missing album is a field error
    async fn album_choice(&self, id: AlbumId) -> Result<Album> {
        self.store.get_album(id).await?.ok_or_else(|| {
            DottifyError::invalid_field(
                "album",
                Violation::Invalid,
                "Select a valid choice. That choice is not one of the available choices.",
            )
        })
    }

    async fn ensure_song_unique(&self, input: &SongInput, excluding: Option<SongId>) -> Result<()> {
        if self
            .store
            .song_title_taken(input.album_id, &input.title, excluding)
            .await?
        {
            return Err(DottifyError::conflict(
                "Song with this Album and Title already exists.",
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Ratings & comments
    // ========================================================================

    pub async fn rate_album(&self, actor: &Actor, album_id: AlbumId, draft: &RatingDraft) -> Result<Rating> {
        guard(actor, "rate album", Some(album_id), access::require_authenticated(actor).map(|_| ()))?;
        let album = self.album(album_id).await?;
        let stars = draft.validate()?;

        self.store
            .create_rating(CreateRating {
                album_id: album.id,
                stars,
            })
            .await
    }

    pub async fn comment_on_album(
        &self,
        actor: &Actor,
        album_id: AlbumId,
        draft: &CommentDraft,
    ) -> Result<Comment> {
        let profile_id = guard(actor, "comment on album", Some(album_id), access::require_profile(actor))?;
        let album = self.album(album_id).await?;
        let comment_text = draft.validate()?;

        self.store
            .create_comment(CreateComment {
                album_id: album.id,
                profile_id,
                comment_text,
            })
            .await
    }
}

/// Pass an access decision through, logging denials
fn guard<T>(actor: &Actor, action: &str, resource: Option<i64>, decision: Result<T>) -> Result<T> {
    if let Err(ref e) = decision {
        tracing::warn!(
            account = ?actor.account_id(),
            profile = ?actor.profile_id(),
            resource = ?resource,
            action,
            "Access refused: {}",
            e
        );
    }
    decision
}
