/// Raw catalog figures as counted by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub users: i64,
    pub albums: i64,
    pub public_playlists: i64,
    pub songs: i64,
    /// Sum of every song's length in seconds
    pub total_song_length: i64,
}
