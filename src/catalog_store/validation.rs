//! Integrity checks for the in-memory catalog.
//!
//! Recomputes every derived value straight from the relationship indexes,
//! independently of the incremental updates done by the store operations,
//! and reports each mismatch as a `Problem`.

use super::store::InMemoryCatalogStore;
use crate::catalog::{AlbumId, ArtistId, SongId};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    SongLikeCountMismatch {
        song: String,
        stored: u64,
        likers: u64,
    },
    DuplicateLiker {
        song: String,
        user: String,
    },
    ArtistLikeCountMismatch {
        artist: String,
        stored: u64,
        expected: u64,
    },
    SongOwnership {
        song: String,
        albums: usize,
    },
    AlbumOwnership {
        album: String,
        artists: usize,
    },
    DuplicateListener {
        playlist: String,
        user: String,
    },
    CreatorNotFirstListener {
        playlist: String,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::SongLikeCountMismatch {
                song,
                stored,
                likers,
            } => write!(
                f,
                "Song '{}' has like count {} but {} likers",
                song, stored, likers
            ),
            Problem::DuplicateLiker { song, user } => {
                write!(f, "User '{}' liked song '{}' more than once", user, song)
            }
            Problem::ArtistLikeCountMismatch {
                artist,
                stored,
                expected,
            } => write!(
                f,
                "Artist '{}' has like count {}, its songs add up to {}",
                artist, stored, expected
            ),
            Problem::SongOwnership { song, albums } => {
                write!(f, "Song '{}' belongs to {} albums", song, albums)
            }
            Problem::AlbumOwnership { album, artists } => {
                write!(f, "Album '{}' belongs to {} artists", album, artists)
            }
            Problem::DuplicateListener { playlist, user } => write!(
                f,
                "User '{}' listens to playlist '{}' more than once",
                user, playlist
            ),
            Problem::CreatorNotFirstListener { playlist } => {
                write!(f, "Playlist '{}' does not start with its creator", playlist)
            }
        }
    }
}

pub fn check_integrity(store: &InMemoryCatalogStore) -> Vec<Problem> {
    let mut problems = Vec::new();
    check_songs(store, &mut problems);
    check_ownership(store, &mut problems);
    check_artist_likes(store, &mut problems);
    check_playlists(store, &mut problems);
    problems
}

fn check_songs(store: &InMemoryCatalogStore, problems: &mut Vec<Problem>) {
    for song in &store.songs {
        let likers = store.song_likes.get(&song.id).map(Vec::as_slice).unwrap_or(&[]);
        let distinct: HashSet<_> = likers.iter().collect();

        if song.likes != distinct.len() as u64 {
            problems.push(Problem::SongLikeCountMismatch {
                song: song.title.clone(),
                stored: song.likes,
                likers: distinct.len() as u64,
            });
        }

        let mut seen = HashSet::new();
        for user_id in likers {
            if !seen.insert(user_id) {
                problems.push(Problem::DuplicateLiker {
                    song: song.title.clone(),
                    user: store.users[user_id.index()].mobile.clone(),
                });
            }
        }
    }
}

fn check_ownership(store: &InMemoryCatalogStore, problems: &mut Vec<Problem>) {
    for song in &store.songs {
        let albums = store
            .album_songs
            .values()
            .filter(|songs| songs.contains(&song.id))
            .count();
        if albums != 1 {
            problems.push(Problem::SongOwnership {
                song: song.title.clone(),
                albums,
            });
        }
    }

    for album in &store.albums {
        let artists = store
            .artist_albums
            .values()
            .filter(|albums| albums.contains(&album.id))
            .count();
        if artists != 1 {
            problems.push(Problem::AlbumOwnership {
                album: album.title.clone(),
                artists,
            });
        }
    }
}

fn check_artist_likes(store: &InMemoryCatalogStore, problems: &mut Vec<Problem>) {
    for artist in &store.artists {
        let expected: u64 = artist_songs(store, artist.id)
            .map(|song_id| store.song_likes.get(&song_id).map_or(0, Vec::len) as u64)
            .sum();
        if artist.likes != expected {
            problems.push(Problem::ArtistLikeCountMismatch {
                artist: artist.name.clone(),
                stored: artist.likes,
                expected,
            });
        }
    }
}

fn artist_songs(
    store: &InMemoryCatalogStore,
    artist_id: ArtistId,
) -> impl Iterator<Item = SongId> + '_ {
    store
        .artist_albums
        .get(&artist_id)
        .into_iter()
        .flatten()
        .flat_map(move |album_id: &AlbumId| store.album_songs.get(album_id).into_iter().flatten())
        .copied()
}

fn check_playlists(store: &InMemoryCatalogStore, problems: &mut Vec<Problem>) {
    for playlist in &store.playlists {
        let listeners = store
            .playlist_listeners
            .get(&playlist.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if listeners.first() != Some(&playlist.creator) {
            problems.push(Problem::CreatorNotFirstListener {
                playlist: playlist.title.clone(),
            });
        }

        let mut seen = HashSet::new();
        for user_id in listeners {
            if !seen.insert(user_id) {
                problems.push(Problem::DuplicateListener {
                    playlist: playlist.title.clone(),
                    user: store.users[user_id.index()].mobile.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UserId;
    use crate::catalog_store::CatalogStore;

    fn make_liked_store() -> InMemoryCatalogStore {
        let mut store = InMemoryCatalogStore::new();
        store.create_album("Alb1", "A1");
        store.create_album("Alb2", "A2");
        store.create_song("S1", "Alb1", 200).unwrap();
        store.create_song("S2", "Alb1", 200).unwrap();
        store.create_song("S3", "Alb2", 100).unwrap();
        store.create_user("u1", "111");
        store.create_user("u2", "222");
        store.create_playlist_by_length("111", "P1", 200).unwrap();
        store.join_playlist("222", "P1").unwrap();
        for (mobile, title) in [
            ("111", "S1"),
            ("111", "S2"),
            ("222", "S1"),
            ("222", "S3"),
            ("111", "S1"),
        ] {
            store.like_song(mobile, title).unwrap();
        }
        store
    }

    #[test]
    fn consistent_store_has_no_problems() {
        let store = make_liked_store();
        assert_eq!(check_integrity(&store), vec![]);
    }

    #[test]
    fn recomputed_artist_likes_match_incremental_ones() {
        let store = make_liked_store();
        for artist in &store.artists {
            let recomputed: usize = artist_songs(&store, artist.id)
                .map(|id| store.song_likes[&id].len())
                .sum();
            assert_eq!(artist.likes, recomputed as u64);
        }
        assert_eq!(store.artists[0].likes, 3);
        assert_eq!(store.artists[1].likes, 1);
    }

    #[test]
    fn detects_tampered_like_counts() {
        let mut store = make_liked_store();
        store.songs[0].likes = 7;
        store.artists[1].likes = 0;

        let problems = check_integrity(&store);

        assert!(problems.contains(&Problem::SongLikeCountMismatch {
            song: "S1".to_string(),
            stored: 7,
            likers: 2,
        }));
        assert!(problems.contains(&Problem::ArtistLikeCountMismatch {
            artist: "A2".to_string(),
            stored: 0,
            expected: 1,
        }));
    }

    #[test]
    fn detects_duplicate_likers_and_listeners() {
        let mut store = make_liked_store();
        store
            .song_likes
            .get_mut(&SongId::new(2))
            .unwrap()
            .push(UserId::new(1));
        store
            .playlist_listeners
            .values_mut()
            .next()
            .unwrap()
            .push(UserId::new(1));

        let problems = check_integrity(&store);

        assert!(problems.contains(&Problem::DuplicateLiker {
            song: "S3".to_string(),
            user: "222".to_string(),
        }));
        assert!(problems.contains(&Problem::DuplicateListener {
            playlist: "P1".to_string(),
            user: "222".to_string(),
        }));
    }

    #[test]
    fn detects_broken_ownership() {
        let mut store = make_liked_store();
        store
            .album_songs
            .get_mut(&AlbumId::new(1))
            .unwrap()
            .push(SongId::new(0));
        store.artist_albums.get_mut(&ArtistId::new(1)).unwrap().clear();

        let problems = check_integrity(&store);

        assert!(problems.contains(&Problem::SongOwnership {
            song: "S1".to_string(),
            albums: 2,
        }));
        assert!(problems.contains(&Problem::AlbumOwnership {
            album: "Alb2".to_string(),
            artists: 0,
        }));
    }

    #[test]
    fn detects_creator_not_first_listener() {
        let mut store = make_liked_store();
        store
            .playlist_listeners
            .values_mut()
            .next()
            .unwrap()
            .reverse();

        let problems = check_integrity(&store);

        assert_eq!(
            problems,
            vec![Problem::CreatorNotFirstListener {
                playlist: "P1".to_string(),
            }]
        );
    }

    #[test]
    fn displays_problem() {
        let problem = Problem::CreatorNotFirstListener {
            playlist: "P1".to_string(),
        };
        assert_eq!(
            problem.to_string(),
            "Playlist 'P1' does not start with its creator"
        );
    }
}
