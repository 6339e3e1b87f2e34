//! Observable client state.
//!
//! A [`Snapshot`] is one immutable version of everything the views render:
//! the session (user and token) plus the cached collections. Snapshots are
//! never edited in place; the store derives the next one from the previous
//! one and a [`crate::Command`].

use std::fmt;

use ticketweb_proto::{
    Bus, ChatMessage, Company, Notification, Promotion, Reservation, Schedule, User,
};

/// One version of the shared client state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Signed-in account. `None` when logged out.
    pub user: Option<User>,
    /// Bearer credential of the session. `None` when logged out.
    pub token: Option<String>,
    /// Reservations of the signed-in account, in server order then booking order.
    pub reservations: Vec<Reservation>,
    /// Cached companies.
    pub companies: Vec<Company>,
    /// Cached buses.
    pub buses: Vec<Bus>,
    /// Cached schedules.
    pub schedules: Vec<Schedule>,
    /// Cached promotions.
    pub promotions: Vec<Promotion>,
    /// Cached notifications.
    pub notifications: Vec<Notification>,
    /// Cached chat transcript.
    pub chat_messages: Vec<ChatMessage>,
}

impl Snapshot {
    /// Returns true if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Returns true if `field` holds the same value in both snapshots.
    pub fn field_eq(&self, other: &Self, field: Field) -> bool {
        match field {
            Field::User => self.user == other.user,
            Field::Token => self.token == other.token,
            Field::Reservations => self.reservations == other.reservations,
            Field::Companies => self.companies == other.companies,
            Field::Buses => self.buses == other.buses,
            Field::Schedules => self.schedules == other.schedules,
            Field::Promotions => self.promotions == other.promotions,
            Field::Notifications => self.notifications == other.notifications,
            Field::ChatMessages => self.chat_messages == other.chat_messages,
        }
    }
}

/// Names one field of [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// [`Snapshot::user`]
    User,
    /// [`Snapshot::token`]
    Token,
    /// [`Snapshot::reservations`]
    Reservations,
    /// [`Snapshot::companies`]
    Companies,
    /// [`Snapshot::buses`]
    Buses,
    /// [`Snapshot::schedules`]
    Schedules,
    /// [`Snapshot::promotions`]
    Promotions,
    /// [`Snapshot::notifications`]
    Notifications,
    /// [`Snapshot::chat_messages`]
    ChatMessages,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::User,
        Self::Token,
        Self::Reservations,
        Self::Companies,
        Self::Buses,
        Self::Schedules,
        Self::Promotions,
        Self::Notifications,
        Self::ChatMessages,
    ];

    /// Field name as written in [`Snapshot`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Token => "token",
            Self::Reservations => "reservations",
            Self::Companies => "companies",
            Self::Buses => "buses",
            Self::Schedules => "schedules",
            Self::Promotions => "promotions",
            Self::Notifications => "notifications",
            Self::ChatMessages => "chat_messages",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
