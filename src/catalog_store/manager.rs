use super::error::{CatalogError, CatalogResult};
use super::trait_def::CatalogStore;
use super::validation::Problem;
use super::InMemoryCatalogStore;
use crate::catalog::{
    Album, Artist, CatalogSummary, Playlist, ResolvedAlbum, ResolvedArtist, ResolvedPlaylist,
    ResolvedSong, ResolvedUser, Song, User,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn, Level};

/// Shared handle to a catalog store.
///
/// Every public operation takes the single store lock for its whole
/// read-modify-write, so concurrent callers always observe the indexes in a
/// consistent state. Clones share the same store.
#[derive(Clone)]
pub struct CatalogManager {
    store: Arc<Mutex<Box<dyn CatalogStore>>>,
}

impl Default for CatalogManager {
    fn default() -> Self {
        Self::new(Box::new(InMemoryCatalogStore::new()))
    }
}

impl CatalogManager {
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    // A failed operation never mutates before returning, so the state behind
    // a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Box<dyn CatalogStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // An empty catalog is a normal state, not worth a warning.
    fn failure_level(err: &CatalogError) -> Level {
        match err {
            CatalogError::EmptyCatalog(_) => Level::DEBUG,
            _ => Level::WARN,
        }
    }

    fn logged<T>(operation: &str, result: CatalogResult<T>) -> CatalogResult<T> {
        if let Err(err) = &result {
            if Self::failure_level(err) == Level::WARN {
                warn!("{} failed: {}", operation, err);
            } else {
                debug!("{} failed: {}", operation, err);
            }
        }
        result
    }

    pub fn create_user(&self, name: &str, mobile: &str) -> User {
        let user = self.lock().create_user(name, mobile);
        info!("Created user {} ({}) with mobile {}", user.name, user.id, user.mobile);
        user
    }

    pub fn create_artist(&self, name: &str) -> Artist {
        let artist = self.lock().create_artist(name);
        info!("Created artist {} ({})", artist.name, artist.id);
        artist
    }

    pub fn create_album(&self, title: &str, artist_name: &str) -> Album {
        let album = self.lock().create_album(title, artist_name);
        info!("Created album {} ({}) by {}", album.title, album.id, artist_name);
        album
    }

    pub fn create_song(&self, title: &str, album_title: &str, length: u32) -> CatalogResult<Song> {
        let song = Self::logged(
            "create_song",
            self.lock().create_song(title, album_title, length),
        )?;
        info!("Created song {} ({}) in album {}", song.title, song.id, album_title);
        Ok(song)
    }

    pub fn create_playlist_by_length(
        &self,
        mobile: &str,
        title: &str,
        length: u32,
    ) -> CatalogResult<Playlist> {
        let playlist = Self::logged(
            "create_playlist_by_length",
            self.lock().create_playlist_by_length(mobile, title, length),
        )?;
        info!(
            "User {} created playlist {} ({}) from songs of length {}",
            mobile, playlist.title, playlist.id, length
        );
        Ok(playlist)
    }

    pub fn create_playlist_by_titles(
        &self,
        mobile: &str,
        title: &str,
        song_titles: &[String],
    ) -> CatalogResult<Playlist> {
        let playlist = Self::logged(
            "create_playlist_by_titles",
            self.lock()
                .create_playlist_by_titles(mobile, title, song_titles),
        )?;
        info!(
            "User {} created playlist {} ({}) from {} titles",
            mobile,
            playlist.title,
            playlist.id,
            song_titles.len()
        );
        Ok(playlist)
    }

    pub fn join_playlist(&self, mobile: &str, playlist_title: &str) -> CatalogResult<Playlist> {
        let mut store = self.lock();
        let before = store
            .get_playlist_listeners(playlist_title)
            .map_or(0, |l| l.len());
        let playlist = Self::logged(
            "join_playlist",
            store.join_playlist(mobile, playlist_title),
        )?;
        let after = store
            .get_playlist_listeners(playlist_title)
            .map_or(0, |l| l.len());
        if after > before {
            info!("User {} joined playlist {}", mobile, playlist.title);
        } else {
            debug!("User {} already listens to {}", mobile, playlist.title);
        }
        Ok(playlist)
    }

    pub fn like_song(&self, mobile: &str, song_title: &str) -> CatalogResult<Song> {
        let mut store = self.lock();
        let before = store.get_song(song_title).map_or(0, |s| s.likes);
        let song = Self::logged("like_song", store.like_song(mobile, song_title))?;
        if song.likes > before {
            info!("User {} liked song {} ({} likes)", mobile, song.title, song.likes);
        } else {
            debug!("User {} already liked {}", mobile, song.title);
        }
        Ok(song)
    }

    pub fn most_popular_artist(&self) -> CatalogResult<String> {
        Self::logged("most_popular_artist", self.lock().most_popular_artist())
    }

    pub fn most_popular_song(&self) -> CatalogResult<String> {
        Self::logged("most_popular_song", self.lock().most_popular_song())
    }

    pub fn get_user(&self, mobile: &str) -> CatalogResult<User> {
        self.lock().get_user(mobile)
    }

    pub fn get_artist(&self, name: &str) -> CatalogResult<Artist> {
        self.lock().get_artist(name)
    }

    pub fn get_album(&self, title: &str) -> CatalogResult<Album> {
        self.lock().get_album(title)
    }

    pub fn get_song(&self, title: &str) -> CatalogResult<Song> {
        self.lock().get_song(title)
    }

    pub fn get_playlist(&self, title: &str) -> CatalogResult<Playlist> {
        self.lock().get_playlist(title)
    }

    pub fn get_artist_albums(&self, name: &str) -> CatalogResult<Vec<Album>> {
        self.lock().get_artist_albums(name)
    }

    pub fn get_album_songs(&self, title: &str) -> CatalogResult<Vec<Song>> {
        self.lock().get_album_songs(title)
    }

    pub fn get_album_artist(&self, title: &str) -> CatalogResult<Option<Artist>> {
        self.lock().get_album_artist(title)
    }

    pub fn get_playlist_songs(&self, title: &str) -> CatalogResult<Vec<Song>> {
        self.lock().get_playlist_songs(title)
    }

    pub fn get_playlist_listeners(&self, title: &str) -> CatalogResult<Vec<User>> {
        self.lock().get_playlist_listeners(title)
    }

    pub fn get_user_playlists(&self, mobile: &str) -> CatalogResult<Vec<Playlist>> {
        self.lock().get_user_playlists(mobile)
    }

    pub fn get_creator_playlist(&self, mobile: &str) -> CatalogResult<Option<Playlist>> {
        self.lock().get_creator_playlist(mobile)
    }

    pub fn get_song_likers(&self, title: &str) -> CatalogResult<Vec<User>> {
        self.lock().get_song_likers(title)
    }

    pub fn get_user_liked_songs(&self, mobile: &str) -> CatalogResult<Vec<Song>> {
        self.lock().get_user_liked_songs(mobile)
    }

    pub fn list_artists(&self) -> Vec<Artist> {
        self.lock().list_artists()
    }

    pub fn list_albums(&self) -> Vec<Album> {
        self.lock().list_albums()
    }

    pub fn list_songs(&self) -> Vec<Song> {
        self.lock().list_songs()
    }

    pub fn list_users(&self) -> Vec<User> {
        self.lock().list_users()
    }

    pub fn list_playlists(&self) -> Vec<Playlist> {
        self.lock().list_playlists()
    }

    pub fn summary(&self) -> CatalogSummary {
        self.lock().summary()
    }

    pub fn resolve_artist(&self, name: &str) -> CatalogResult<ResolvedArtist> {
        self.lock().resolve_artist(name)
    }

    pub fn resolve_album(&self, title: &str) -> CatalogResult<ResolvedAlbum> {
        self.lock().resolve_album(title)
    }

    pub fn resolve_song(&self, title: &str) -> CatalogResult<ResolvedSong> {
        self.lock().resolve_song(title)
    }

    pub fn resolve_playlist(&self, title: &str) -> CatalogResult<ResolvedPlaylist> {
        self.lock().resolve_playlist(title)
    }

    pub fn resolve_user(&self, mobile: &str) -> CatalogResult<ResolvedUser> {
        self.lock().resolve_user(mobile)
    }

    pub fn check_integrity(&self) -> Vec<Problem> {
        let problems = self.lock().check_integrity();
        if problems.is_empty() {
            info!("Catalog checked, no issues found.");
        } else {
            warn!("Catalog check found {} problems", problems.len());
            for problem in problems.iter() {
                warn!("- {}", problem);
            }
        }
        problems
    }
}
