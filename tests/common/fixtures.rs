//! Seed catalog shared by the end-to-end tests

use super::constants::*;
use music_catalog_store::CatalogManager;
use std::io::Write;
use tempfile::NamedTempFile;

/// Script building the seed catalog, no likes or joins.
pub fn seed_script() -> String {
    format!(
        r#"# Seed catalog
add-user Alice {alice}
add-user Bob {bob}
add-user Carol {carol}

add-album "{album1}" "{artist1}"
add-artist "{artist2}"
add-album "{album2}" "{artist2}"

add-song "{t1}" "{album1}" {long}
add-song "{t2}" "{album1}" 180
add-song "{t3}" "{album1}" {long}
add-song "{t4}" "{album2}" 300
add-song "{t5}" "{album2}" {long}

playlist-by-length {alice} "{long_pl}" {long}
playlist-by-titles {bob} "{mix_pl}" "{t2}" "{t4}" "{t2}"
"#,
        alice = ALICE_MOBILE,
        bob = BOB_MOBILE,
        carol = CAROL_MOBILE,
        artist1 = ARTIST_1_NAME,
        artist2 = ARTIST_2_NAME,
        album1 = ALBUM_1_TITLE,
        album2 = ALBUM_2_TITLE,
        t1 = TRACK_1_TITLE,
        t2 = TRACK_2_TITLE,
        t3 = TRACK_3_TITLE,
        t4 = TRACK_4_TITLE,
        t5 = TRACK_5_TITLE,
        long = LONG_LENGTH,
        long_pl = PLAYLIST_LONG,
        mix_pl = PLAYLIST_MIX,
    )
}

/// A manager holding the seed catalog.
pub fn seeded_manager() -> CatalogManager {
    let manager = CatalogManager::default();
    music_catalog_store::replay_script(
        &manager,
        &seed_script(),
        music_catalog_store::ReplayMode::Strict,
    )
    .unwrap();
    manager
}

pub fn write_script(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
