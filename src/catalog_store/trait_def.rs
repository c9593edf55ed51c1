//! CatalogStore trait definition.
//!
//! The operation surface of the catalog. Implementations own every entity
//! collection and every relationship index; callers only ever go through
//! these methods, so the indexes cannot drift apart.

use super::error::CatalogResult;
use super::validation::Problem;
use crate::catalog::{
    Album, Artist, CatalogSummary, Playlist, ResolvedAlbum, ResolvedArtist, ResolvedPlaylist,
    ResolvedSong, ResolvedUser, Song, User,
};

/// Trait for catalog storage backends.
///
/// All name, title and mobile lookups use exact string equality and resolve
/// to the first matching entity in creation order.
pub trait CatalogStore: Send {
    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a user. Mobile numbers are not checked for duplicates.
    fn create_user(&mut self, name: &str, mobile: &str) -> User;

    /// Create an artist with no likes and no albums.
    fn create_artist(&mut self, name: &str) -> Artist;

    /// Create an album for the first artist named `artist_name`,
    /// creating that artist if it does not exist yet.
    fn create_album(&mut self, title: &str, artist_name: &str) -> Album;

    /// Create a song in the first album titled `album_title`.
    /// Fails with `AlbumNotFound` instead of creating the album.
    fn create_song(&mut self, title: &str, album_title: &str, length: u32) -> CatalogResult<Song>;

    /// Create a playlist holding every song whose length equals `length`.
    fn create_playlist_by_length(
        &mut self,
        mobile: &str,
        title: &str,
        length: u32,
    ) -> CatalogResult<Playlist>;

    /// Create a playlist holding every song whose title is in `song_titles`.
    fn create_playlist_by_titles(
        &mut self,
        mobile: &str,
        title: &str,
        song_titles: &[String],
    ) -> CatalogResult<Playlist>;

    // =========================================================================
    // Relationship Operations
    // =========================================================================

    /// Add the user as a listener of the playlist. Joining twice is a no-op.
    fn join_playlist(&mut self, mobile: &str, playlist_title: &str) -> CatalogResult<Playlist>;

    /// Record that the user likes the song and propagate the like to the
    /// owning artist. Liking twice is a no-op.
    fn like_song(&mut self, mobile: &str, song_title: &str) -> CatalogResult<Song>;

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Name of the artist with the highest like count, earliest wins ties.
    fn most_popular_artist(&self) -> CatalogResult<String>;

    /// Title of the song with the highest like count, earliest wins ties.
    fn most_popular_song(&self) -> CatalogResult<String>;

    // =========================================================================
    // Entity Lookup
    // =========================================================================

    fn get_user(&self, mobile: &str) -> CatalogResult<User>;

    fn get_artist(&self, name: &str) -> CatalogResult<Artist>;

    fn get_album(&self, title: &str) -> CatalogResult<Album>;

    fn get_song(&self, title: &str) -> CatalogResult<Song>;

    fn get_playlist(&self, title: &str) -> CatalogResult<Playlist>;

    // =========================================================================
    // Relationship Lookup
    // =========================================================================

    /// Albums of the artist, in the order they were created.
    fn get_artist_albums(&self, name: &str) -> CatalogResult<Vec<Album>>;

    /// Songs of the album, in the order they were created.
    fn get_album_songs(&self, title: &str) -> CatalogResult<Vec<Song>>;

    /// The artist owning the album, `None` only if the indexes are broken.
    fn get_album_artist(&self, title: &str) -> CatalogResult<Option<Artist>>;

    /// Songs fixed into the playlist at creation.
    fn get_playlist_songs(&self, title: &str) -> CatalogResult<Vec<Song>>;

    /// Listeners of the playlist, creator first.
    fn get_playlist_listeners(&self, title: &str) -> CatalogResult<Vec<User>>;

    /// Every playlist the user created or joined, in the order recorded.
    fn get_user_playlists(&self, mobile: &str) -> CatalogResult<Vec<Playlist>>;

    /// The playlist the user created most recently, if any.
    fn get_creator_playlist(&self, mobile: &str) -> CatalogResult<Option<Playlist>>;

    /// Users who liked the song, in like order.
    fn get_song_likers(&self, title: &str) -> CatalogResult<Vec<User>>;

    /// Songs liked by the user, in song creation order.
    fn get_user_liked_songs(&self, mobile: &str) -> CatalogResult<Vec<Song>>;

    // =========================================================================
    // Listing and Counts
    // =========================================================================

    fn list_artists(&self) -> Vec<Artist>;

    fn list_albums(&self) -> Vec<Album>;

    fn list_songs(&self) -> Vec<Song>;

    fn list_users(&self) -> Vec<User>;

    fn list_playlists(&self) -> Vec<Playlist>;

    fn summary(&self) -> CatalogSummary;

    // =========================================================================
    // Resolved Views
    // =========================================================================

    fn resolve_artist(&self, name: &str) -> CatalogResult<ResolvedArtist>;

    fn resolve_album(&self, title: &str) -> CatalogResult<ResolvedAlbum>;

    fn resolve_song(&self, title: &str) -> CatalogResult<ResolvedSong>;

    fn resolve_playlist(&self, title: &str) -> CatalogResult<ResolvedPlaylist>;

    fn resolve_user(&self, mobile: &str) -> CatalogResult<ResolvedUser>;

    // =========================================================================
    // Integrity
    // =========================================================================

    /// Recompute every derived value from scratch and report mismatches.
    fn check_integrity(&self) -> Vec<Problem>;
}
