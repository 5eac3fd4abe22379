/// API route modules
pub mod album_songs;
pub mod albums;
pub mod auth;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod statistics;
