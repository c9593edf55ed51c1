use super::AlbumId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
}

impl Album {
    pub fn new(id: AlbumId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
