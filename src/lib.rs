//! Music Catalog Store Library
//!
//! An in-memory relationship engine for a music catalog: artists own albums,
//! albums own songs, users create and join playlists and like songs.

pub mod catalog;
pub mod catalog_store;
pub mod cli_style;
pub mod commands;
pub mod config;
pub mod logging;

// Re-export commonly used types for convenience
pub use catalog::{Album, Artist, CatalogSummary, Playlist, PlaylistSelection, Song, User};
pub use catalog_store::{
    CatalogError, CatalogManager, CatalogResult, CatalogStore, InMemoryCatalogStore, Problem,
};
pub use commands::{
    replay_script, run_commands, CommandOutput, CommandRecord, ReplayMode, ReplayReport,
};
