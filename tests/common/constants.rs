//! Shared constants for end-to-end tests
//!
//! When the seed catalog changes, update only this file and `fixtures.rs`.

// ============================================================================
// Users
// ============================================================================

/// Mobile of "Alice", creator of PLAYLIST_LONG
pub const ALICE_MOBILE: &str = "111";

/// Mobile of "Bob", creator of PLAYLIST_MIX
pub const BOB_MOBILE: &str = "222";

/// Mobile of "Carol", who never creates a playlist
pub const CAROL_MOBILE: &str = "333";

// ============================================================================
// Catalog
// ============================================================================

pub const ARTIST_1_NAME: &str = "The Test Band";
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

/// Album by ARTIST_1_NAME with TRACK_1, TRACK_2, TRACK_3
pub const ALBUM_1_TITLE: &str = "First Album";

/// Album by ARTIST_2_NAME with TRACK_4, TRACK_5
pub const ALBUM_2_TITLE: &str = "Jazz Collection";

pub const TRACK_1_TITLE: &str = "Opening Track";
pub const TRACK_2_TITLE: &str = "Second Song";
pub const TRACK_3_TITLE: &str = "Closing Time";
pub const TRACK_4_TITLE: &str = "Blue Notes";
pub const TRACK_5_TITLE: &str = "Late Night";

/// Length shared by TRACK_1, TRACK_3 and TRACK_5
pub const LONG_LENGTH: u32 = 240;

// ============================================================================
// Playlists
// ============================================================================

/// Created by Alice from every song of LONG_LENGTH
pub const PLAYLIST_LONG: &str = "Long Ones";

/// Created by Bob from TRACK_2 and TRACK_4
pub const PLAYLIST_MIX: &str = "Mix";
