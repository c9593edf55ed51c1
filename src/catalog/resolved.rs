//! Joined read views over the catalog indexes.
//!
//! These are built on demand by the store and never stored, so they always
//! reflect the relationship indexes at the time of the call. Owners are
//! `None` only when the ownership indexes are broken.

use super::{Album, Artist, Playlist, Song, User};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    pub artist: Artist,
    pub albums: Vec<Album>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAlbum {
    pub album: Album,
    pub artist: Option<Artist>,
    pub songs: Vec<Song>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSong {
    pub song: Song,
    pub album: Option<Album>,
    pub artist: Option<Artist>,
    pub liked_by: Vec<User>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaylist {
    pub playlist: Playlist,
    pub creator: User,
    pub listeners: Vec<User>,
    pub songs: Vec<Song>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub user: User,
    pub playlists: Vec<Playlist>,
    /// Most recently created playlist, if any.
    pub created_playlist: Option<Playlist>,
    pub liked_songs: Vec<Song>,
}

/// Entity counts, for logging and the replay summary.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub artists: usize,
    pub albums: usize,
    pub songs: usize,
    pub users: usize,
    pub playlists: usize,
    pub song_likes: usize,
}
