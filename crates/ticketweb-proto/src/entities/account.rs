//! Accounts, notifications and chat.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{EntityId, Related};

/// Account role, stored by the server as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Role {
    /// Platform administrator (code 0).
    Admin,
    /// Ticket buyer (code 1).
    #[default]
    Passenger,
    /// Bus company operator (code 2).
    Company,
    /// Ticket sales agent (code 3).
    Agent,
    /// Code not known to this client.
    Other(u8),
}

impl From<u8> for Role {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Admin,
            1 => Self::Passenger,
            2 => Self::Company,
            3 => Self::Agent,
            other => Self::Other(other),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => 0,
            Role::Passenger => 1,
            Role::Company => 2,
            Role::Agent => 3,
            Role::Other(code) => code,
        }
    }
}

/// Authenticated account as returned by `users/me/`.
///
/// This is the session user cached in the client snapshot after login.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Primary key.
    pub id: EntityId,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Hosted avatar URL. `None` if the account has no avatar.
    pub avatar_url: Option<String>,
    /// Account role.
    pub role: Role,
}

impl User {
    /// Display name: "first last" when set, otherwise the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() { self.username.clone() } else { full.to_owned() }
    }
}

/// In-app notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Primary key.
    pub id: EntityId,
    /// Headline.
    pub title: String,
    /// Rich-text body. `None` if empty.
    pub body: Option<String>,
    /// Whether the user has seen it.
    pub is_read: bool,
    /// Creation date (`YYYY-MM-DD`).
    pub created_date: Option<String>,
}

/// Message between two users (or a user and support).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    /// Primary key.
    pub id: EntityId,
    /// Author.
    pub sender: Option<Related<User>>,
    /// Recipient.
    pub receiver: Option<Related<User>>,
    /// Message text.
    pub message: String,
    /// When the message was sent.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrips_known_and_unknown_codes() {
        let roles: Vec<Role> = serde_json::from_str("[0, 1, 2, 3, 9]").unwrap();
        assert_eq!(roles, vec![
            Role::Admin,
            Role::Passenger,
            Role::Company,
            Role::Agent,
            Role::Other(9)
        ]);
        assert_eq!(serde_json::to_string(&Role::Other(9)).unwrap(), "9");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = User { username: "lan".into(), ..User::default() };
        assert_eq!(user.display_name(), "lan");

        user.first_name = "Lan".into();
        user.last_name = "Nguyen".into();
        assert_eq!(user.display_name(), "Lan Nguyen");
    }
}
