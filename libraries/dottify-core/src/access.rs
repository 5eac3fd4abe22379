//! Visibility & ownership engine
//!
//! Pure functions of (actor, resource snapshot). Callers resolve the
//! resources through the store first and pass the records in; nothing here
//! performs I/O, so every check happens before any write.
//!
//! Write checks run in a fixed order:
//! 1. anonymous actors need to log in,
//! 2. actors with neither the artist nor the admin role are denied,
//! 3. admins are always allowed,
//! 4. artists are allowed only on resources their profile owns.

use crate::error::{DottifyError, Result};
use crate::roles::{Actor, Member};
use crate::types::{Album, Playlist, ProfileId, Visibility};

/// Albums an actor sees on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumScope {
    All,
    OwnedBy(ProfileId),
    /// Shown, but matches nothing
    Empty,
}

impl AlbumScope {
    pub fn admits(&self, album: &Album) -> bool {
        match self {
            AlbumScope::All => true,
            AlbumScope::OwnedBy(profile) => album.artist_account == Some(*profile),
            AlbumScope::Empty => false,
        }
    }
}

/// Playlists an actor sees on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistScope {
    All,
    PublicOnly,
    OwnedBy(ProfileId),
    Empty,
}

impl PlaylistScope {
    pub fn admits(&self, playlist: &Playlist) -> bool {
        match self {
            PlaylistScope::All => true,
            PlaylistScope::PublicOnly => is_publicly_listed(playlist),
            PlaylistScope::OwnedBy(profile) => playlist.owner_id == *profile,
            PlaylistScope::Empty => false,
        }
    }
}

/// Songs an actor sees on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongScope {
    All,
}

/// What the home page lists for one actor. `None` means the section is
/// absent altogether, which is distinct from an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeScope {
    pub albums: Option<AlbumScope>,
    pub playlists: Option<PlaylistScope>,
    pub songs: Option<SongScope>,
}

/// Catalog-listing scope for the home page.
///
/// | actor     | albums | playlists  | songs |
/// |-----------|--------|------------|-------|
/// | anonymous | all    | public     | -     |
/// | normal    | -      | own        | -     |
/// | artist    | own    | -          | -     |
/// | admin     | all    | all        | all   |
pub fn home_scope(actor: &Actor) -> HomeScope {
    match actor {
        Actor::Anonymous => HomeScope {
            albums: Some(AlbumScope::All),
            playlists: Some(PlaylistScope::PublicOnly),
            songs: None,
        },
        _ if actor.is_admin() => HomeScope {
            albums: Some(AlbumScope::All),
            playlists: Some(PlaylistScope::All),
            songs: Some(SongScope::All),
        },
        _ if actor.is_artist() => HomeScope {
            albums: Some(
                actor
                    .profile_id()
                    .map_or(AlbumScope::Empty, AlbumScope::OwnedBy),
            ),
            playlists: None,
            songs: None,
        },
        _ => HomeScope {
            albums: None,
            playlists: Some(
                actor
                    .profile_id()
                    .map_or(PlaylistScope::Empty, PlaylistScope::OwnedBy),
            ),
            songs: None,
        },
    }
}

/// Only Public playlists appear in public listings (the REST API and
/// anonymous views). Unlisted ones are reachable only by their owner.
pub fn is_publicly_listed(playlist: &Playlist) -> bool {
    playlist.visibility == Visibility::Public
}

/// Whether `actor` may see `playlist` on its owner's profile page
pub fn can_view_on_profile(actor: &Actor, playlist: &Playlist) -> bool {
    actor.is_admin()
        || actor.profile_id() == Some(playlist.owner_id)
        || is_publicly_listed(playlist)
}

/// Any logged-in actor passes
pub fn require_authenticated(actor: &Actor) -> Result<&Member> {
    match actor {
        Actor::Anonymous => Err(DottifyError::AuthenticationRequired),
        Actor::Member(member) => Ok(member),
    }
}

/// Logged in *and* backed by a profile
pub fn require_profile(actor: &Actor) -> Result<ProfileId> {
    require_authenticated(actor)?
        .profile_id
        .ok_or_else(|| DottifyError::denied("Profile missing."))
}

/// Logged in and holding the artist or admin role
fn require_catalog_role(actor: &Actor) -> Result<&Member> {
    let member = require_authenticated(actor)?;
    if !(actor.is_artist() || actor.is_admin()) {
        return Err(DottifyError::denied("You must be an artist or DottifyAdmin"));
    }
    Ok(member)
}

/// The artist's profile, or a denial when it is missing
fn artist_profile(member: &Member) -> Result<ProfileId> {
    member
        .profile_id
        .ok_or_else(|| DottifyError::denied("Artist profile missing."))
}

fn owns(member: &Member, album: &Album) -> Result<bool> {
    let profile = artist_profile(member)?;
    Ok(album.artist_account == Some(profile))
}

/// May the actor open the album or song creation form at all
pub fn authorize_catalog_write(actor: &Actor) -> Result<()> {
    require_catalog_role(actor).map(|_| ())
}

/// Authorize creating an album and decide its owner.
///
/// Admins create unowned albums; an artist's album always belongs to the
/// artist's own profile, whatever the client asked for.
pub fn authorize_album_create(actor: &Actor) -> Result<Option<ProfileId>> {
    let member = require_catalog_role(actor)?;
    if actor.is_admin() {
        return Ok(None);
    }
    artist_profile(member).map(Some)
}

/// Authorize editing or deleting an existing album
pub fn authorize_album_change(actor: &Actor, album: &Album) -> Result<()> {
    let member = require_catalog_role(actor)?;
    if actor.is_admin() {
        return Ok(());
    }
    if owns(member, album)? {
        Ok(())
    } else {
        Err(DottifyError::denied("You don't own this album"))
    }
}

/// Authorize adding a song to `album`
pub fn authorize_song_create(actor: &Actor, album: &Album) -> Result<()> {
    let member = require_catalog_role(actor)?;
    if actor.is_admin() {
        return Ok(());
    }
    if owns(member, album)? {
        Ok(())
    } else {
        Err(DottifyError::denied("You can only add songs to your own albums"))
    }
}

/// Authorize editing or deleting a song that currently lives on `album`
pub fn authorize_song_change(actor: &Actor, album: &Album) -> Result<()> {
    let member = require_catalog_role(actor)?;
    if actor.is_admin() {
        return Ok(());
    }
    if owns(member, album)? {
        Ok(())
    } else {
        Err(DottifyError::denied("You are not allowed to change this song"))
    }
}

/// Authorize an edit that places a song on `target` (which may differ from
/// its current album). Checked in addition to [`authorize_song_change`].
pub fn authorize_song_move(actor: &Actor, target: &Album) -> Result<()> {
    let member = require_catalog_role(actor)?;
    if actor.is_admin() {
        return Ok(());
    }
    if owns(member, target)? {
        Ok(())
    } else {
        Err(DottifyError::denied("You can only move songs within your own albums"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::types::{Price, NO_COVER_IMAGE};
    use chrono::{NaiveDate, Utc};

    const ARTIST_PROFILE: ProfileId = 10;
    const OTHER_ARTIST_PROFILE: ProfileId = 11;
    const NORMAL_PROFILE: ProfileId = 12;
    const ADMIN_PROFILE: ProfileId = 13;

    fn normal() -> Actor {
        Actor::member(1, Some(NORMAL_PROFILE), Vec::<Role>::new())
    }

    fn artist() -> Actor {
        Actor::member(2, Some(ARTIST_PROFILE), [Role::Artist])
    }

    fn admin() -> Actor {
        Actor::member(3, Some(ADMIN_PROFILE), [Role::Admin])
    }

    fn album(owner: Option<ProfileId>) -> Album {
        Album {
            id: 1,
            title: "Album".to_string(),
            artist_name: "Artist".to_string(),
            artist_account: owner,
            retail_price: Price::from_scaled(500),
            format: None,
            release_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            slug: "album".to_string(),
            cover_image: NO_COVER_IMAGE.to_string(),
        }
    }

    fn playlist(owner: ProfileId, visibility: Visibility) -> Playlist {
        Playlist {
            id: 1,
            name: "Mix".to_string(),
            created_at: Utc::now(),
            visibility,
            owner_id: owner,
            song_ids: vec![],
        }
    }

    fn is_denied<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(DottifyError::AuthorizationDenied(_)))
    }

    fn needs_login<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(DottifyError::AuthenticationRequired))
    }

    #[test]
    fn home_scope_for_anonymous() {
        let scope = home_scope(&Actor::Anonymous);
        assert_eq!(scope.albums, Some(AlbumScope::All));
        assert_eq!(scope.playlists, Some(PlaylistScope::PublicOnly));
        assert_eq!(scope.songs, None);
    }

    #[test]
    fn home_scope_for_normal_user() {
        let scope = home_scope(&normal());
        assert_eq!(scope.albums, None);
        assert_eq!(scope.playlists, Some(PlaylistScope::OwnedBy(NORMAL_PROFILE)));
        assert_eq!(scope.songs, None);
    }

    #[test]
    fn home_scope_for_artist() {
        let scope = home_scope(&artist());
        assert_eq!(scope.albums, Some(AlbumScope::OwnedBy(ARTIST_PROFILE)));
        assert_eq!(scope.playlists, None);
        assert_eq!(scope.songs, None);
    }

    #[test]
    fn home_scope_for_admin() {
        let scope = home_scope(&admin());
        assert_eq!(scope.albums, Some(AlbumScope::All));
        assert_eq!(scope.playlists, Some(PlaylistScope::All));
        assert_eq!(scope.songs, Some(SongScope::All));
    }

    #[test]
    fn admin_wins_over_artist() {
        let both = Actor::member(4, Some(ADMIN_PROFILE), [Role::Artist, Role::Admin]);
        assert_eq!(home_scope(&both).songs, Some(SongScope::All));
        assert_eq!(authorize_album_create(&both).unwrap(), None);
        assert!(authorize_song_create(&both, &album(Some(OTHER_ARTIST_PROFILE))).is_ok());
    }

    #[test]
    fn profileless_members_get_empty_scopes() {
        let artist = Actor::member(5, None, [Role::Artist]);
        assert_eq!(home_scope(&artist).albums, Some(AlbumScope::Empty));
        let normal = Actor::member(6, None, Vec::<Role>::new());
        assert_eq!(home_scope(&normal).playlists, Some(PlaylistScope::Empty));
    }

    #[test]
    fn scopes_filter_records() {
        let own = album(Some(ARTIST_PROFILE));
        let other = album(Some(OTHER_ARTIST_PROFILE));
        let scope = AlbumScope::OwnedBy(ARTIST_PROFILE);
        assert!(scope.admits(&own));
        assert!(!scope.admits(&other));
        assert!(!AlbumScope::Empty.admits(&own));

        let public = playlist(NORMAL_PROFILE, Visibility::Public);
        let hidden = playlist(NORMAL_PROFILE, Visibility::Hidden);
        let unlisted = playlist(NORMAL_PROFILE, Visibility::Unlisted);
        assert!(PlaylistScope::PublicOnly.admits(&public));
        assert!(!PlaylistScope::PublicOnly.admits(&hidden));
        assert!(!PlaylistScope::PublicOnly.admits(&unlisted));
        assert!(PlaylistScope::OwnedBy(NORMAL_PROFILE).admits(&hidden));
    }

    #[test]
    fn profile_page_hides_private_playlists_from_strangers() {
        let hidden = playlist(NORMAL_PROFILE, Visibility::Hidden);
        assert!(can_view_on_profile(&normal(), &hidden));
        assert!(can_view_on_profile(&admin(), &hidden));
        assert!(!can_view_on_profile(&artist(), &hidden));
        assert!(!can_view_on_profile(&Actor::Anonymous, &hidden));
        let public = playlist(NORMAL_PROFILE, Visibility::Public);
        assert!(can_view_on_profile(&Actor::Anonymous, &public));
    }

    #[test]
    fn anonymous_writes_need_login() {
        let anon = Actor::Anonymous;
        assert!(needs_login(authorize_album_create(&anon)));
        assert!(needs_login(authorize_album_change(&anon, &album(None))));
        assert!(needs_login(authorize_song_create(&anon, &album(None))));
        assert!(needs_login(authorize_song_change(&anon, &album(None))));
        assert!(needs_login(require_profile(&anon)));
    }

    #[test]
    fn normal_users_cannot_write_catalog() {
        let own_album = album(Some(NORMAL_PROFILE));
        assert!(is_denied(authorize_catalog_write(&normal())));
        assert!(is_denied(authorize_album_create(&normal())));
        assert!(is_denied(authorize_album_change(&normal(), &own_album)));
        assert!(is_denied(authorize_song_create(&normal(), &own_album)));
        assert!(is_denied(authorize_song_change(&normal(), &own_album)));
    }

    #[test]
    fn artist_album_is_forced_to_own_profile() {
        assert_eq!(authorize_album_create(&artist()).unwrap(), Some(ARTIST_PROFILE));
    }

    #[test]
    fn artist_writes_limited_to_owned_albums() {
        let own = album(Some(ARTIST_PROFILE));
        let other = album(Some(OTHER_ARTIST_PROFILE));
        let unowned = album(None);

        assert!(authorize_album_change(&artist(), &own).is_ok());
        assert!(is_denied(authorize_album_change(&artist(), &other)));
        assert!(is_denied(authorize_album_change(&artist(), &unowned)));

        assert!(authorize_song_create(&artist(), &own).is_ok());
        assert!(is_denied(authorize_song_create(&artist(), &other)));

        assert!(authorize_song_change(&artist(), &own).is_ok());
        assert!(is_denied(authorize_song_change(&artist(), &other)));

        assert!(authorize_song_move(&artist(), &own).is_ok());
        assert!(is_denied(authorize_song_move(&artist(), &other)));
    }

    #[test]
    fn admin_writes_anywhere() {
        let other = album(Some(OTHER_ARTIST_PROFILE));
        assert_eq!(authorize_album_create(&admin()).unwrap(), None);
        assert!(authorize_album_change(&admin(), &other).is_ok());
        assert!(authorize_song_create(&admin(), &other).is_ok());
        assert!(authorize_song_change(&admin(), &other).is_ok());
        assert!(authorize_song_move(&admin(), &album(None)).is_ok());
    }

    #[test]
    fn artist_without_profile_is_denied_not_crashed() {
        let broken = Actor::member(7, None, [Role::Artist]);
        assert!(is_denied(authorize_album_create(&broken)));
        assert!(is_denied(authorize_song_create(&broken, &album(None))));
        assert!(is_denied(authorize_album_change(&broken, &album(None))));
    }
}
