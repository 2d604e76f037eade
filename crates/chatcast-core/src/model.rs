//! Broadcast data model.

use serde::{Deserialize, Serialize};

/// A chat participant. Created once by the client and attached to every
/// message it sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Opaque unique id.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One published message. Lives for a single dispatch pass on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Sender.
    pub user: User,
    pub content: String,
    /// Opaque timestamp chosen by the sender.
    #[serde(default)]
    pub timestamp: String,
}

impl Message {
    pub fn new(user: User, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            user,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// True when `user` authored this message.
    pub fn is_from(&self, user: &User) -> bool {
        self.user.id == user.id
    }
}
