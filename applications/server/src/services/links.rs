/// Canonical URLs for catalog resources
use dottify_core::{Album, AlbumId, Profile, SongId};

/// Builds absolute API links and the human-facing paths that redirects
/// point at
#[derive(Debug, Clone)]
pub struct Links {
    public_url: String,
    media_url: String,
}

impl Links {
    pub fn new(public_url: impl Into<String>, media_url: impl Into<String>) -> Self {
        let public_url = public_url.into().trim_end_matches('/').to_string();
        let mut media_url = media_url.into();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        Self {
            public_url,
            media_url,
        }
    }

    /// `http://host/api/songs/{id}/`
    pub fn song_api_url(&self, id: SongId) -> String {
        format!("{}/api/songs/{}/", self.public_url, id)
    }

    /// Absolute URL of a stored cover image
    pub fn cover_url(&self, cover_image: &str) -> String {
        format!("{}{}{}", self.public_url, self.media_url, cover_image)
    }

    /// `/albums/{id}/`
    pub fn album_path(&self, id: AlbumId) -> String {
        format!("/albums/{id}/")
    }

    /// `/albums/{id}/{slug}/`
    pub fn album_slug_path(&self, album: &Album) -> String {
        format!("/albums/{}/{}/", album.id, album.slug)
    }

    /// `/songs/{id}/`
    pub fn song_path(&self, id: SongId) -> String {
        format!("/songs/{id}/")
    }

    /// `/users/{id}/{display-name-slug}/`
    pub fn user_path(&self, profile: &Profile) -> String {
        format!("/users/{}/{}/", profile.id, profile.slug())
    }
}
