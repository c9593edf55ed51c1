mod album;
mod artist;
mod ids;
mod playlist;
mod resolved;
mod song;
mod user;

pub use album::Album;
pub use artist::Artist;
pub use ids::{AlbumId, ArtistId, PlaylistId, SongId, UserId};
pub use playlist::{Playlist, PlaylistSelection};
pub use resolved::{
    CatalogSummary, ResolvedAlbum, ResolvedArtist, ResolvedPlaylist, ResolvedSong, ResolvedUser,
};
pub use song::Song;
pub use user::User;
