use serde::{Deserialize, Serialize};

/// Mailbox the backend's inbound parser listens on.
pub const INBOX_ADDRESS: &str = "assignments@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Teacher,
    Student,
}

impl ActorRole {
    /// Fixed sender address the backend associates with this role.
    pub fn from_address(self) -> &'static str {
        match self {
            ActorRole::Teacher => "teacher@example.com",
            ActorRole::Student => "student@example.com",
        }
    }
}
