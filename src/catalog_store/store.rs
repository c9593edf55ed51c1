//! In-memory catalog store.
//!
//! Entities live in creation-ordered vectors, so an entity id is also its
//! index in the matching vector. Every relationship is an index keyed by
//! entity id and owned by the store, nothing is shared with callers.

use super::error::{CatalogError, CatalogResult};
use super::trait_def::CatalogStore;
use super::validation::{self, Problem};
use crate::catalog::{
    Album, AlbumId, Artist, ArtistId, CatalogSummary, Playlist, PlaylistId, PlaylistSelection,
    ResolvedAlbum, ResolvedArtist, ResolvedPlaylist, ResolvedSong, ResolvedUser, Song, SongId,
    User, UserId,
};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    pub(super) artists: Vec<Artist>,
    pub(super) albums: Vec<Album>,
    pub(super) songs: Vec<Song>,
    pub(super) users: Vec<User>,
    pub(super) playlists: Vec<Playlist>,

    pub(super) artist_albums: HashMap<ArtistId, Vec<AlbumId>>,
    pub(super) album_songs: HashMap<AlbumId, Vec<SongId>>,
    pub(super) playlist_songs: HashMap<PlaylistId, Vec<SongId>>,
    pub(super) playlist_listeners: HashMap<PlaylistId, Vec<UserId>>,
    /// Latest playlist created by each user, overwritten on every creation.
    pub(super) creator_playlist: HashMap<UserId, PlaylistId>,
    pub(super) user_playlists: HashMap<UserId, Vec<PlaylistId>>,
    pub(super) song_likes: HashMap<SongId, Vec<UserId>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Key lookups, first match in creation order
    // =========================================================================

    fn find_user(&self, mobile: &str) -> CatalogResult<UserId> {
        self.users
            .iter()
            .find(|user| user.mobile == mobile)
            .map(|user| user.id)
            .ok_or_else(|| CatalogError::UserNotFound(mobile.to_owned()))
    }

    fn find_artist(&self, name: &str) -> Option<ArtistId> {
        self.artists
            .iter()
            .find(|artist| artist.name == name)
            .map(|artist| artist.id)
    }

    fn find_album(&self, title: &str) -> CatalogResult<AlbumId> {
        self.albums
            .iter()
            .find(|album| album.title == title)
            .map(|album| album.id)
            .ok_or_else(|| CatalogError::AlbumNotFound(title.to_owned()))
    }

    fn find_song(&self, title: &str) -> CatalogResult<SongId> {
        self.songs
            .iter()
            .find(|song| song.title == title)
            .map(|song| song.id)
            .ok_or_else(|| CatalogError::SongNotFound(title.to_owned()))
    }

    fn find_playlist(&self, title: &str) -> CatalogResult<PlaylistId> {
        self.playlists
            .iter()
            .find(|playlist| playlist.title == title)
            .map(|playlist| playlist.id)
            .ok_or_else(|| CatalogError::PlaylistNotFound(title.to_owned()))
    }

    // =========================================================================
    // Id resolution
    // =========================================================================

    fn artist(&self, id: ArtistId) -> &Artist {
        &self.artists[id.index()]
    }

    fn album(&self, id: AlbumId) -> &Album {
        &self.albums[id.index()]
    }

    fn song(&self, id: SongId) -> &Song {
        &self.songs[id.index()]
    }

    fn user(&self, id: UserId) -> &User {
        &self.users[id.index()]
    }

    fn playlist(&self, id: PlaylistId) -> &Playlist {
        &self.playlists[id.index()]
    }

    fn albums_of(&self, ids: Option<&Vec<AlbumId>>) -> Vec<Album> {
        ids.into_iter()
            .flatten()
            .map(|id| self.album(*id).clone())
            .collect()
    }

    fn songs_of(&self, ids: Option<&Vec<SongId>>) -> Vec<Song> {
        ids.into_iter()
            .flatten()
            .map(|id| self.song(*id).clone())
            .collect()
    }

    fn users_of(&self, ids: Option<&Vec<UserId>>) -> Vec<User> {
        ids.into_iter()
            .flatten()
            .map(|id| self.user(*id).clone())
            .collect()
    }

    fn playlists_of(&self, ids: Option<&Vec<PlaylistId>>) -> Vec<Playlist> {
        ids.into_iter()
            .flatten()
            .map(|id| self.playlist(*id).clone())
            .collect()
    }

    // =========================================================================
    // Ownership traversal
    // =========================================================================

    /// First album, in creation order, whose song list holds the song.
    pub(super) fn owning_album(&self, song_id: SongId) -> Option<AlbumId> {
        self.albums
            .iter()
            .map(|album| album.id)
            .find(|album_id| {
                self.album_songs
                    .get(album_id)
                    .is_some_and(|songs| songs.contains(&song_id))
            })
    }

    /// First artist, in creation order, whose album list holds the album.
    pub(super) fn owning_artist(&self, album_id: AlbumId) -> Option<ArtistId> {
        self.artists
            .iter()
            .map(|artist| artist.id)
            .find(|artist_id| {
                self.artist_albums
                    .get(artist_id)
                    .is_some_and(|albums| albums.contains(&album_id))
            })
    }

    fn register_playlist(
        &mut self,
        user_id: UserId,
        title: &str,
        selection: PlaylistSelection,
        songs: Vec<SongId>,
    ) -> Playlist {
        let id = PlaylistId::new(self.playlists.len());
        let playlist = Playlist::new(id, title, user_id, selection);

        self.playlist_songs.insert(id, songs);
        self.playlist_listeners.insert(id, vec![user_id]);
        self.creator_playlist.insert(user_id, id);
        self.user_playlists.entry(user_id).or_default().push(id);
        self.playlists.push(playlist.clone());

        playlist
    }

    fn most_liked<'a, T>(items: &'a [T], likes: impl Fn(&T) -> u64) -> Option<&'a T> {
        items.iter().reduce(|best, item| {
            if likes(item) > likes(best) {
                item
            } else {
                best
            }
        })
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn create_user(&mut self, name: &str, mobile: &str) -> User {
        let user = User::new(UserId::new(self.users.len()), name, mobile);
        self.user_playlists.insert(user.id, Vec::new());
        self.users.push(user.clone());
        user
    }

    fn create_artist(&mut self, name: &str) -> Artist {
        let artist = Artist::new(ArtistId::new(self.artists.len()), name);
        self.artist_albums.insert(artist.id, Vec::new());
        self.artists.push(artist.clone());
        artist
    }

    fn create_album(&mut self, title: &str, artist_name: &str) -> Album {
        let artist_id = match self.find_artist(artist_name) {
            Some(id) => id,
            None => {
                debug!("Artist {} not found, creating it", artist_name);
                self.create_artist(artist_name).id
            }
        };

        let album = Album::new(AlbumId::new(self.albums.len()), title);
        self.album_songs.insert(album.id, Vec::new());
        self.artist_albums
            .entry(artist_id)
            .or_default()
            .push(album.id);
        self.albums.push(album.clone());
        album
    }

    fn create_song(&mut self, title: &str, album_title: &str, length: u32) -> CatalogResult<Song> {
        let album_id = self.find_album(album_title)?;

        let song = Song::new(SongId::new(self.songs.len()), title, length);
        self.song_likes.insert(song.id, Vec::new());
        self.album_songs.entry(album_id).or_default().push(song.id);
        self.songs.push(song.clone());
        Ok(song)
    }

    fn create_playlist_by_length(
        &mut self,
        mobile: &str,
        title: &str,
        length: u32,
    ) -> CatalogResult<Playlist> {
        let user_id = self.find_user(mobile)?;
        let songs = self
            .songs
            .iter()
            .filter(|song| song.length == length)
            .map(|song| song.id)
            .collect();
        Ok(self.register_playlist(user_id, title, PlaylistSelection::ByLength, songs))
    }

    fn create_playlist_by_titles(
        &mut self,
        mobile: &str,
        title: &str,
        song_titles: &[String],
    ) -> CatalogResult<Playlist> {
        let user_id = self.find_user(mobile)?;
        let songs = self
            .songs
            .iter()
            .filter(|song| song_titles.iter().any(|t| *t == song.title))
            .map(|song| song.id)
            .collect();
        Ok(self.register_playlist(user_id, title, PlaylistSelection::ByTitles, songs))
    }

    fn join_playlist(&mut self, mobile: &str, playlist_title: &str) -> CatalogResult<Playlist> {
        let user_id = self.find_user(mobile)?;
        let playlist_id = self.find_playlist(playlist_title)?;

        let listeners = self.playlist_listeners.entry(playlist_id).or_default();
        if !listeners.contains(&user_id) {
            listeners.push(user_id);
        }

        let joined = self.user_playlists.entry(user_id).or_default();
        if !joined.contains(&playlist_id) {
            joined.push(playlist_id);
        }

        Ok(self.playlist(playlist_id).clone())
    }

    fn like_song(&mut self, mobile: &str, song_title: &str) -> CatalogResult<Song> {
        let user_id = self.find_user(mobile)?;
        let song_id = self.find_song(song_title)?;

        let likers = self.song_likes.entry(song_id).or_default();
        if likers.contains(&user_id) {
            return Ok(self.song(song_id).clone());
        }
        likers.push(user_id);
        let like_count = likers.len() as u64;
        self.songs[song_id.index()].likes = like_count;

        // No song -> artist index exists, walk artist -> album -> song.
        for artist in self.artists.iter_mut() {
            let Some(album_ids) = self.artist_albums.get(&artist.id) else {
                continue;
            };
            for album_id in album_ids {
                if self
                    .album_songs
                    .get(album_id)
                    .is_some_and(|songs| songs.contains(&song_id))
                {
                    artist.likes += 1;
                }
            }
        }

        Ok(self.song(song_id).clone())
    }

    fn most_popular_artist(&self) -> CatalogResult<String> {
        Self::most_liked(&self.artists, |artist| artist.likes)
            .map(|artist| artist.name.clone())
            .ok_or(CatalogError::EmptyCatalog("artists"))
    }

    fn most_popular_song(&self) -> CatalogResult<String> {
        Self::most_liked(&self.songs, |song| song.likes)
            .map(|song| song.title.clone())
            .ok_or(CatalogError::EmptyCatalog("songs"))
    }

    fn get_user(&self, mobile: &str) -> CatalogResult<User> {
        Ok(self.user(self.find_user(mobile)?).clone())
    }

    fn get_artist(&self, name: &str) -> CatalogResult<Artist> {
        self.find_artist(name)
            .map(|id| self.artist(id).clone())
            .ok_or_else(|| CatalogError::ArtistNotFound(name.to_owned()))
    }

    fn get_album(&self, title: &str) -> CatalogResult<Album> {
        Ok(self.album(self.find_album(title)?).clone())
    }

    fn get_song(&self, title: &str) -> CatalogResult<Song> {
        Ok(self.song(self.find_song(title)?).clone())
    }

    fn get_playlist(&self, title: &str) -> CatalogResult<Playlist> {
        Ok(self.playlist(self.find_playlist(title)?).clone())
    }

    fn get_artist_albums(&self, name: &str) -> CatalogResult<Vec<Album>> {
        let artist = self.get_artist(name)?;
        Ok(self.albums_of(self.artist_albums.get(&artist.id)))
    }

    fn get_album_songs(&self, title: &str) -> CatalogResult<Vec<Song>> {
        let album_id = self.find_album(title)?;
        Ok(self.songs_of(self.album_songs.get(&album_id)))
    }

    fn get_album_artist(&self, title: &str) -> CatalogResult<Option<Artist>> {
        let album_id = self.find_album(title)?;
        Ok(self
            .owning_artist(album_id)
            .map(|id| self.artist(id).clone()))
    }

    fn get_playlist_songs(&self, title: &str) -> CatalogResult<Vec<Song>> {
        let playlist_id = self.find_playlist(title)?;
        Ok(self.songs_of(self.playlist_songs.get(&playlist_id)))
    }

    fn get_playlist_listeners(&self, title: &str) -> CatalogResult<Vec<User>> {
        let playlist_id = self.find_playlist(title)?;
        Ok(self.users_of(self.playlist_listeners.get(&playlist_id)))
    }

    fn get_user_playlists(&self, mobile: &str) -> CatalogResult<Vec<Playlist>> {
        let user_id = self.find_user(mobile)?;
        Ok(self.playlists_of(self.user_playlists.get(&user_id)))
    }

    fn get_creator_playlist(&self, mobile: &str) -> CatalogResult<Option<Playlist>> {
        let user_id = self.find_user(mobile)?;
        Ok(self
            .creator_playlist
            .get(&user_id)
            .map(|id| self.playlist(*id).clone()))
    }

    fn get_song_likers(&self, title: &str) -> CatalogResult<Vec<User>> {
        let song_id = self.find_song(title)?;
        Ok(self.users_of(self.song_likes.get(&song_id)))
    }

    fn get_user_liked_songs(&self, mobile: &str) -> CatalogResult<Vec<Song>> {
        let user_id = self.find_user(mobile)?;
        Ok(self
            .songs
            .iter()
            .filter(|song| {
                self.song_likes
                    .get(&song.id)
                    .is_some_and(|likers| likers.contains(&user_id))
            })
            .cloned()
            .collect())
    }

    fn list_artists(&self) -> Vec<Artist> {
        self.artists.clone()
    }

    fn list_albums(&self) -> Vec<Album> {
        self.albums.clone()
    }

    fn list_songs(&self) -> Vec<Song> {
        self.songs.clone()
    }

    fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn list_playlists(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            artists: self.artists.len(),
            albums: self.albums.len(),
            songs: self.songs.len(),
            users: self.users.len(),
            playlists: self.playlists.len(),
            song_likes: self.song_likes.values().map(Vec::len).sum(),
        }
    }

    fn resolve_artist(&self, name: &str) -> CatalogResult<ResolvedArtist> {
        let artist = self.get_artist(name)?;
        let albums = self.albums_of(self.artist_albums.get(&artist.id));
        Ok(ResolvedArtist { artist, albums })
    }

    fn resolve_album(&self, title: &str) -> CatalogResult<ResolvedAlbum> {
        let album_id = self.find_album(title)?;
        Ok(ResolvedAlbum {
            album: self.album(album_id).clone(),
            artist: self
                .owning_artist(album_id)
                .map(|id| self.artist(id).clone()),
            songs: self.songs_of(self.album_songs.get(&album_id)),
        })
    }

    fn resolve_song(&self, title: &str) -> CatalogResult<ResolvedSong> {
        let song_id = self.find_song(title)?;
        let album_id = self.owning_album(song_id);
        Ok(ResolvedSong {
            song: self.song(song_id).clone(),
            album: album_id.map(|id| self.album(id).clone()),
            artist: album_id
                .and_then(|id| self.owning_artist(id))
                .map(|id| self.artist(id).clone()),
            liked_by: self.users_of(self.song_likes.get(&song_id)),
        })
    }

    fn resolve_playlist(&self, title: &str) -> CatalogResult<ResolvedPlaylist> {
        let playlist = self.playlist(self.find_playlist(title)?).clone();
        Ok(ResolvedPlaylist {
            creator: self.user(playlist.creator).clone(),
            listeners: self.users_of(self.playlist_listeners.get(&playlist.id)),
            songs: self.songs_of(self.playlist_songs.get(&playlist.id)),
            playlist,
        })
    }

    fn resolve_user(&self, mobile: &str) -> CatalogResult<ResolvedUser> {
        let user_id = self.find_user(mobile)?;
        Ok(ResolvedUser {
            user: self.user(user_id).clone(),
            playlists: self.playlists_of(self.user_playlists.get(&user_id)),
            created_playlist: self
                .creator_playlist
                .get(&user_id)
                .map(|id| self.playlist(*id).clone()),
            liked_songs: self.get_user_liked_songs(mobile)?,
        })
    }

    fn check_integrity(&self) -> Vec<Problem> {
        validation::check_integrity(self)
    }
}
