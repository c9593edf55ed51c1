//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{seeded_manager, TRACK_1_TITLE};
//!
//! #[test]
//! fn test_song_exists() {
//!     let manager = seeded_manager();
//!     assert!(manager.get_song(TRACK_1_TITLE).is_ok());
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{seed_script, seeded_manager, write_script};
