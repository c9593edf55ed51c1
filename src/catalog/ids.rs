//! Typed identifiers for catalog entities.
//!
//! Every entity gets a sequential id at creation time, equal to its position
//! in the store's creation-ordered collection. All relationship indexes key
//! off these ids, never off names or titles.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                $name(index)
            }

            /// Position of the entity in creation order.
            pub fn index(&self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

entity_id!(ArtistId, "AR");
entity_id!(AlbumId, "AL");
entity_id!(SongId, "S");
entity_id!(UserId, "U");
entity_id!(
    /// Identifier of a playlist, two playlists may share a title.
    PlaylistId,
    "P"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_kind_prefix() {
        assert_eq!(ArtistId::new(0).to_string(), "AR0");
        assert_eq!(AlbumId::new(3).to_string(), "AL3");
        assert_eq!(SongId::new(12).to_string(), "S12");
        assert_eq!(UserId::new(1).to_string(), "U1");
        assert_eq!(PlaylistId::new(7).to_string(), "P7");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&SongId::new(4)).unwrap();
        assert_eq!(json, "4");
        let parsed: SongId = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.index(), 4);
    }
}
