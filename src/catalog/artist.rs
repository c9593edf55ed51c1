use super::ArtistId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// One per (user, song) like event on any song of this artist,
    /// not deduplicated by user.
    pub likes: u64,
}

impl Artist {
    pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            likes: 0,
        }
    }
}
