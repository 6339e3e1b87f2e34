//! Entities returned by the ticketing API.
//!
//! Grouped by the part of the domain they belong to:
//!
//! - [`account`]: users, notifications and chat
//! - [`fleet`]: companies, buses, routes, schedules and seats
//! - [`booking`]: reservations, payments and promotions

pub mod account;
pub mod booking;
pub mod fleet;

use std::fmt;

pub use account::{ChatMessage, Notification, Role, User};
pub use booking::{
    DiscountType, Payment, PaymentMethod, PaymentStatus, Promotion, Reservation,
    ReservationDetail, ReservationStatus,
};
pub use fleet::{Bus, BusStatus, Company, Route, Schedule, ScheduleStatus, Seat, SeatStatus};
use serde::{Deserialize, Deserializer, Serialize};

use crate::EntityId;

/// A server row identified by its primary key.
pub trait Entity {
    /// Server-assigned primary key.
    fn id(&self) -> EntityId;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> EntityId {
                self.id
            }
        })*
    };
}

impl_entity!(
    User,
    Notification,
    ChatMessage,
    Company,
    Bus,
    Route,
    Schedule,
    Seat,
    Reservation,
    ReservationDetail,
    Payment,
    Promotion,
);

/// Decimal amount in the server's textual rendering.
///
/// The API renders decimals as strings (`"150000.00"`) by default but may be
/// configured to emit JSON numbers; both decode. The text is kept verbatim so
/// no precision is lost on the way through the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(pub String);

impl Amount {
    /// Amount as text, exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}
