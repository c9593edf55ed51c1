use super::SongId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub length: u32,
    /// Number of distinct users who liked the song.
    pub likes: u64,
}

impl Song {
    pub fn new(id: SongId, title: impl Into<String>, length: u32) -> Self {
        Self {
            id,
            title: title.into(),
            length,
            likes: 0,
        }
    }
}
