use super::{PlaylistId, UserId};
use serde::{Deserialize, Serialize};

/// How the song membership of a playlist was selected at creation.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistSelection {
    ByLength,
    ByTitles,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub title: String,
    pub creator: UserId,
    pub selection: PlaylistSelection,
}

impl Playlist {
    pub fn new(
        id: PlaylistId,
        title: impl Into<String>,
        creator: UserId,
        selection: PlaylistSelection,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            creator,
            selection,
        }
    }
}
