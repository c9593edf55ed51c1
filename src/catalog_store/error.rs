//! Errors returned by catalog store operations.
//!
//! Every failing lookup happens before any state is touched, so an `Err`
//! always means the store is exactly as it was before the call.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("User with mobile {0} does not exist")]
    UserNotFound(String),

    #[error("Artist {0} does not exist")]
    ArtistNotFound(String),

    #[error("Album {0} does not exist")]
    AlbumNotFound(String),

    #[error("Song {0} does not exist")]
    SongNotFound(String),

    #[error("Playlist {0} does not exist")]
    PlaylistNotFound(String),

    /// The aggregate was asked over an empty collection ("artists" or "songs").
    #[error("The catalog has no {0}")]
    EmptyCatalog(&'static str),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
