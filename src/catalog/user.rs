use super::UserId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Lookup key. Not unique, lookups resolve to the earliest user.
    pub mobile: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mobile: mobile.into(),
        }
    }
}
