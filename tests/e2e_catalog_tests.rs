//! End-to-end tests for the catalog operations
//!
//! Runs the relationship engine through `CatalogManager` on the seed catalog.

mod common;

use common::{
    seeded_manager, ALBUM_1_TITLE, ALBUM_2_TITLE, ALICE_MOBILE, ARTIST_1_NAME, ARTIST_2_NAME,
    BOB_MOBILE, CAROL_MOBILE, LONG_LENGTH, PLAYLIST_LONG, PLAYLIST_MIX, TRACK_1_TITLE,
    TRACK_2_TITLE, TRACK_3_TITLE, TRACK_4_TITLE, TRACK_5_TITLE,
};
use music_catalog_store::{CatalogError, CatalogManager};

fn titles(songs: &[music_catalog_store::Song]) -> Vec<&str> {
    songs.iter().map(|s| s.title.as_str()).collect()
}

/// Sum of liker set sizes over every song the artist owns, through the
/// public read queries only.
fn recomputed_artist_likes(manager: &CatalogManager, artist: &str) -> u64 {
    manager
        .get_artist_albums(artist)
        .unwrap()
        .iter()
        .flat_map(|album| manager.get_album_songs(&album.title).unwrap())
        .map(|song| manager.get_song_likers(&song.title).unwrap().len() as u64)
        .sum()
}

// =============================================================================
// Catalog structure
// =============================================================================

#[test]
fn test_seed_builds_ownership_indexes() {
    let manager = seeded_manager();

    let albums = manager.get_artist_albums(ARTIST_1_NAME).unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].title, ALBUM_1_TITLE);

    let songs = manager.get_album_songs(ALBUM_1_TITLE).unwrap();
    assert_eq!(titles(&songs), vec![TRACK_1_TITLE, TRACK_2_TITLE, TRACK_3_TITLE]);

    let owner = manager.get_album_artist(ALBUM_2_TITLE).unwrap().unwrap();
    assert_eq!(owner.name, ARTIST_2_NAME);

    // The explicitly created artist is reused, not duplicated.
    assert_eq!(manager.list_artists().len(), 2);
}

#[test]
fn test_get_unknown_entities_returns_not_found() {
    let manager = seeded_manager();

    assert_eq!(
        manager.get_artist("Nobody"),
        Err(CatalogError::ArtistNotFound("Nobody".to_string()))
    );
    assert_eq!(
        manager.get_album("Nothing"),
        Err(CatalogError::AlbumNotFound("Nothing".to_string()))
    );
    assert_eq!(
        manager.get_user("999"),
        Err(CatalogError::UserNotFound("999".to_string()))
    );
}

#[test]
fn test_song_on_missing_album_changes_nothing() {
    let manager = seeded_manager();
    let before = manager.summary();

    let result = manager.create_song("S3", "NoSuchAlbum", 100);

    assert_eq!(
        result,
        Err(CatalogError::AlbumNotFound("NoSuchAlbum".to_string()))
    );
    assert_eq!(manager.summary(), before);
    assert!(manager.get_song("S3").is_err());
}

// =============================================================================
// Playlists
// =============================================================================

#[test]
fn test_playlist_by_length_membership_and_listeners() {
    let manager = seeded_manager();

    let songs = manager.get_playlist_songs(PLAYLIST_LONG).unwrap();
    assert_eq!(titles(&songs), vec![TRACK_1_TITLE, TRACK_3_TITLE, TRACK_5_TITLE]);
    assert!(songs.iter().all(|s| s.length == LONG_LENGTH));

    let listeners = manager.get_playlist_listeners(PLAYLIST_LONG).unwrap();
    assert_eq!(listeners.len(), 1);
    assert_eq!(listeners[0].mobile, ALICE_MOBILE);

    let playlist = manager.get_playlist(PLAYLIST_LONG).unwrap();
    assert_eq!(playlist.creator, listeners[0].id);
}

#[test]
fn test_playlist_by_titles_lists_each_song_once() {
    let manager = seeded_manager();

    let songs = manager.get_playlist_songs(PLAYLIST_MIX).unwrap();

    assert_eq!(titles(&songs), vec![TRACK_2_TITLE, TRACK_4_TITLE]);
}

#[test]
fn test_playlist_membership_survives_later_creation() {
    let manager = seeded_manager();

    manager.create_album("Late Album", "Late Artist");
    manager
        .create_song("Another Long One", "Late Album", LONG_LENGTH)
        .unwrap();
    manager.like_song(CAROL_MOBILE, TRACK_1_TITLE).unwrap();

    let songs = manager.get_playlist_songs(PLAYLIST_LONG).unwrap();
    assert_eq!(titles(&songs), vec![TRACK_1_TITLE, TRACK_3_TITLE, TRACK_5_TITLE]);
}

#[test]
fn test_join_playlist_is_idempotent() {
    let manager = seeded_manager();

    manager.join_playlist(CAROL_MOBILE, PLAYLIST_LONG).unwrap();
    manager.join_playlist(CAROL_MOBILE, PLAYLIST_LONG).unwrap();
    manager.join_playlist(ALICE_MOBILE, PLAYLIST_LONG).unwrap();

    let listeners = manager.get_playlist_listeners(PLAYLIST_LONG).unwrap();
    let mobiles: Vec<&str> = listeners.iter().map(|u| u.mobile.as_str()).collect();
    assert_eq!(mobiles, vec![ALICE_MOBILE, CAROL_MOBILE]);

    let carol_playlists = manager.get_user_playlists(CAROL_MOBILE).unwrap();
    assert_eq!(carol_playlists.len(), 1);
    assert_eq!(carol_playlists[0].title, PLAYLIST_LONG);
}

#[test]
fn test_join_playlist_failures() {
    let manager = seeded_manager();

    assert_eq!(
        manager.join_playlist("999", PLAYLIST_LONG),
        Err(CatalogError::UserNotFound("999".to_string()))
    );
    assert_eq!(
        manager.join_playlist(CAROL_MOBILE, "Missing"),
        Err(CatalogError::PlaylistNotFound("Missing".to_string()))
    );
    assert!(manager.get_user_playlists(CAROL_MOBILE).unwrap().is_empty());
}

#[test]
fn test_user_playlists_accumulate_while_creator_cache_moves() {
    let manager = seeded_manager();

    manager
        .create_playlist_by_length(ALICE_MOBILE, "Short Ones", 180)
        .unwrap();
    manager.join_playlist(ALICE_MOBILE, PLAYLIST_MIX).unwrap();

    let playlists = manager.get_user_playlists(ALICE_MOBILE).unwrap();
    let names: Vec<&str> = playlists.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(names, vec![PLAYLIST_LONG, "Short Ones", PLAYLIST_MIX]);

    let cached = manager.get_creator_playlist(ALICE_MOBILE).unwrap().unwrap();
    assert_eq!(cached.title, "Short Ones");

    // The first playlist still knows its creator.
    let first = manager.resolve_playlist(PLAYLIST_LONG).unwrap();
    assert_eq!(first.creator.mobile, ALICE_MOBILE);

    assert_eq!(manager.get_creator_playlist(CAROL_MOBILE).unwrap(), None);
}

// =============================================================================
// Likes
// =============================================================================

#[test]
fn test_like_same_song_twice_counts_once() {
    let manager = seeded_manager();

    manager.like_song(ALICE_MOBILE, TRACK_1_TITLE).unwrap();
    let song = manager.like_song(ALICE_MOBILE, TRACK_1_TITLE).unwrap();

    assert_eq!(song.likes, 1);
    assert_eq!(manager.get_artist(ARTIST_1_NAME).unwrap().likes, 1);
}

#[test]
fn test_two_users_two_songs_same_artist() {
    let manager = seeded_manager();

    for mobile in [ALICE_MOBILE, BOB_MOBILE] {
        manager.like_song(mobile, TRACK_1_TITLE).unwrap();
        manager.like_song(mobile, TRACK_2_TITLE).unwrap();
    }

    assert_eq!(manager.get_artist(ARTIST_1_NAME).unwrap().likes, 4);
    assert_eq!(manager.get_artist(ARTIST_2_NAME).unwrap().likes, 0);
}

#[test]
fn test_like_failures_change_nothing() {
    let manager = seeded_manager();

    assert_eq!(
        manager.like_song("999", TRACK_1_TITLE),
        Err(CatalogError::UserNotFound("999".to_string()))
    );
    assert_eq!(
        manager.like_song(ALICE_MOBILE, "No Such Song"),
        Err(CatalogError::SongNotFound("No Such Song".to_string()))
    );
    assert_eq!(manager.summary().song_likes, 0);
    assert!(manager.list_artists().iter().all(|a| a.likes == 0));
}

#[test]
fn test_like_counts_match_recomputation_after_mixed_activity() {
    let manager = seeded_manager();
    let events = [
        (ALICE_MOBILE, TRACK_1_TITLE),
        (BOB_MOBILE, TRACK_4_TITLE),
        (CAROL_MOBILE, TRACK_1_TITLE),
        (ALICE_MOBILE, TRACK_5_TITLE),
        (ALICE_MOBILE, TRACK_1_TITLE),
        (BOB_MOBILE, TRACK_3_TITLE),
        (CAROL_MOBILE, TRACK_4_TITLE),
        (BOB_MOBILE, TRACK_4_TITLE),
        (CAROL_MOBILE, TRACK_2_TITLE),
    ];
    for (mobile, title) in events {
        manager.like_song(mobile, title).unwrap();
    }

    for song in manager.list_songs() {
        let likers = manager.get_song_likers(&song.title).unwrap();
        assert_eq!(song.likes, likers.len() as u64, "song {}", song.title);
    }
    for artist in manager.list_artists() {
        assert_eq!(
            artist.likes,
            recomputed_artist_likes(&manager, &artist.name),
            "artist {}",
            artist.name
        );
    }
    assert_eq!(manager.get_artist(ARTIST_1_NAME).unwrap().likes, 4);
    assert_eq!(manager.get_artist(ARTIST_2_NAME).unwrap().likes, 3);
    assert_eq!(manager.summary().song_likes, 7);
    assert!(manager.check_integrity().is_empty());
}

#[test]
fn test_resolve_user_lists_liked_songs() {
    let manager = seeded_manager();

    manager.like_song(BOB_MOBILE, TRACK_5_TITLE).unwrap();
    manager.like_song(BOB_MOBILE, TRACK_2_TITLE).unwrap();

    let view = manager.resolve_user(BOB_MOBILE).unwrap();
    let liked: Vec<&str> = view.liked_songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(liked.len(), 2);
    assert!(liked.contains(&TRACK_5_TITLE));
    assert!(liked.contains(&TRACK_2_TITLE));
    assert_eq!(view.created_playlist.unwrap().title, PLAYLIST_MIX);
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn test_most_popular_prefers_earliest_on_ties() {
    let manager = seeded_manager();

    // No likes at all: every entity ties at zero.
    assert_eq!(manager.most_popular_artist().unwrap(), ARTIST_1_NAME);
    assert_eq!(manager.most_popular_song().unwrap(), TRACK_1_TITLE);

    manager.like_song(ALICE_MOBILE, TRACK_4_TITLE).unwrap();
    manager.like_song(ALICE_MOBILE, TRACK_2_TITLE).unwrap();

    assert_eq!(manager.most_popular_artist().unwrap(), ARTIST_1_NAME);
    assert_eq!(manager.most_popular_song().unwrap(), TRACK_2_TITLE);

    manager.like_song(BOB_MOBILE, TRACK_4_TITLE).unwrap();

    assert_eq!(manager.most_popular_artist().unwrap(), ARTIST_2_NAME);
    assert_eq!(manager.most_popular_song().unwrap(), TRACK_4_TITLE);
}

#[test]
fn test_most_popular_on_empty_catalog() {
    let manager = CatalogManager::default();

    assert_eq!(
        manager.most_popular_artist(),
        Err(CatalogError::EmptyCatalog("artists"))
    );
    assert_eq!(
        manager.most_popular_song(),
        Err(CatalogError::EmptyCatalog("songs"))
    );
}

// =============================================================================
// Resolved views
// =============================================================================

#[test]
fn test_resolve_song_joins_owners_and_likers() {
    let manager = seeded_manager();
    manager.like_song(CAROL_MOBILE, TRACK_4_TITLE).unwrap();

    let view = manager.resolve_song(TRACK_4_TITLE).unwrap();

    assert_eq!(view.album.unwrap().title, ALBUM_2_TITLE);
    assert_eq!(view.artist.unwrap().name, ARTIST_2_NAME);
    assert_eq!(view.liked_by.len(), 1);
    assert_eq!(view.liked_by[0].mobile, CAROL_MOBILE);

    let json = serde_json::to_value(manager.resolve_album(ALBUM_2_TITLE).unwrap()).unwrap();
    assert_eq!(json["artist"]["name"], ARTIST_2_NAME);
    assert_eq!(json["songs"].as_array().unwrap().len(), 2);
}
