//! State commands.
//!
//! A [`Command`] names one allowed state transition. Commands travel in a
//! tagged envelope `{"type": TAG, "payload": ...}`; [`Command::decode`] reads
//! that form and [`Command::to_value`] writes it.
//!
//! Decoding never rejects an unknown tag. It becomes
//! [`Command::Unrecognized`], which the store ignores.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use ticketweb_proto::{
    Bus, ChatMessage, Company, Notification, Promotion, Reservation, Schedule, User,
};

use crate::Field;

/// `SET_USER` tag.
pub const SET_USER: &str = "SET_USER";
/// `LOGOUT` tag.
pub const LOGOUT: &str = "LOGOUT";
/// `SET_COMPANIES` tag.
pub const SET_COMPANIES: &str = "SET_COMPANIES";
/// `SET_BUSES` tag.
pub const SET_BUSES: &str = "SET_BUSES";
/// `SET_SCHEDULES` tag.
pub const SET_SCHEDULES: &str = "SET_SCHEDULES";
/// `SET_RESERVATIONS` tag.
pub const SET_RESERVATIONS: &str = "SET_RESERVATIONS";
/// `ADD_RESERVATION` tag.
pub const ADD_RESERVATION: &str = "ADD_RESERVATION";
/// `SET_PROMOTIONS` tag.
pub const SET_PROMOTIONS: &str = "SET_PROMOTIONS";
/// `SET_NOTIFICATIONS` tag.
pub const SET_NOTIFICATIONS: &str = "SET_NOTIFICATIONS";
/// `SET_CHAT_MESSAGES` tag.
pub const SET_CHAT_MESSAGES: &str = "SET_CHAT_MESSAGES";

/// Every recognized tag.
pub const TAGS: [&str; 10] = [
    SET_USER,
    LOGOUT,
    SET_COMPANIES,
    SET_BUSES,
    SET_SCHEDULES,
    SET_RESERVATIONS,
    ADD_RESERVATION,
    SET_PROMOTIONS,
    SET_NOTIFICATIONS,
    SET_CHAT_MESSAGES,
];

/// A tagged instruction describing one state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the session user and token.
    SetUser {
        /// Signed-in account; `None` clears it.
        user: Option<User>,
        /// Session credential.
        token: Option<String>,
    },
    /// Clear the session user and token.
    Logout,
    /// Replace the cached companies.
    SetCompanies(Vec<Company>),
    /// Replace the cached buses.
    SetBuses(Vec<Bus>),
    /// Replace the cached schedules.
    SetSchedules(Vec<Schedule>),
    /// Replace the reservations.
    SetReservations(Vec<Reservation>),
    /// Append one reservation.
    AddReservation(Reservation),
    /// Replace the cached promotions.
    SetPromotions(Vec<Promotion>),
    /// Replace the cached notifications.
    SetNotifications(Vec<Notification>),
    /// Replace the cached chat transcript.
    SetChatMessages(Vec<ChatMessage>),
    /// A tag this client does not know. Reduces to no change.
    Unrecognized {
        /// Tag as received.
        tag: String,
    },
}

/// Payload of `SET_USER`.
#[derive(Serialize, Deserialize)]
struct SessionPayload {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
}

/// Errors decoding a command envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Input was not a `{"type": ..., "payload": ...}` object.
    #[error("malformed command envelope: {reason}")]
    Envelope {
        /// What was wrong with the envelope.
        reason: String,
    },

    /// A recognized tag carried a payload of the wrong shape.
    #[error("malformed {tag} payload: {reason}")]
    Payload {
        /// Command tag.
        tag: &'static str,
        /// Decoder message.
        reason: String,
    },
}

fn payload<T: DeserializeOwned>(tag: &'static str, value: Value) -> Result<T, CommandError> {
    serde_json::from_value(value).map_err(|e| CommandError::Payload { tag, reason: e.to_string() })
}

impl Command {
    /// Wire tag of this command.
    pub fn tag(&self) -> &str {
        match self {
            Self::SetUser { .. } => SET_USER,
            Self::Logout => LOGOUT,
            Self::SetCompanies(_) => SET_COMPANIES,
            Self::SetBuses(_) => SET_BUSES,
            Self::SetSchedules(_) => SET_SCHEDULES,
            Self::SetReservations(_) => SET_RESERVATIONS,
            Self::AddReservation(_) => ADD_RESERVATION,
            Self::SetPromotions(_) => SET_PROMOTIONS,
            Self::SetNotifications(_) => SET_NOTIFICATIONS,
            Self::SetChatMessages(_) => SET_CHAT_MESSAGES,
            Self::Unrecognized { tag } => tag.as_str(),
        }
    }

    /// Returns true unless this is [`Command::Unrecognized`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }

    /// Snapshot fields this command may change. Every other field is left
    /// as it was.
    pub fn targets(&self) -> &'static [Field] {
        match self {
            Self::SetUser { .. } | Self::Logout => &[Field::User, Field::Token],
            Self::SetCompanies(_) => &[Field::Companies],
            Self::SetBuses(_) => &[Field::Buses],
            Self::SetSchedules(_) => &[Field::Schedules],
            Self::SetReservations(_) | Self::AddReservation(_) => &[Field::Reservations],
            Self::SetPromotions(_) => &[Field::Promotions],
            Self::SetNotifications(_) => &[Field::Notifications],
            Self::SetChatMessages(_) => &[Field::ChatMessages],
            Self::Unrecognized { .. } => &[],
        }
    }

    /// Decode the tagged envelope.
    ///
    /// A missing `payload` reads as `null`, which is what `LOGOUT` carries.
    ///
    /// # Errors
    ///
    /// - [`CommandError::Envelope`] if `value` is not an object with a string
    ///   `type`
    /// - [`CommandError::Payload`] if a recognized tag carries the wrong shape
    pub fn decode(value: &Value) -> Result<Self, CommandError> {
        let object = value
            .as_object()
            .ok_or_else(|| CommandError::Envelope { reason: "expected a JSON object".into() })?;
        let tag = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CommandError::Envelope { reason: "missing string `type`".into() })?;
        let body = object.get("payload").cloned().unwrap_or(Value::Null);

        let command = match tag {
            SET_USER => {
                let session: SessionPayload = payload(SET_USER, body)?;
                Self::SetUser { user: session.user, token: session.token }
            },
            LOGOUT => Self::Logout,
            SET_COMPANIES => Self::SetCompanies(payload(SET_COMPANIES, body)?),
            SET_BUSES => Self::SetBuses(payload(SET_BUSES, body)?),
            SET_SCHEDULES => Self::SetSchedules(payload(SET_SCHEDULES, body)?),
            SET_RESERVATIONS => Self::SetReservations(payload(SET_RESERVATIONS, body)?),
            ADD_RESERVATION => Self::AddReservation(payload(ADD_RESERVATION, body)?),
            SET_PROMOTIONS => Self::SetPromotions(payload(SET_PROMOTIONS, body)?),
            SET_NOTIFICATIONS => Self::SetNotifications(payload(SET_NOTIFICATIONS, body)?),
            SET_CHAT_MESSAGES => Self::SetChatMessages(payload(SET_CHAT_MESSAGES, body)?),
            other => Self::Unrecognized { tag: other.to_owned() },
        };
        Ok(command)
    }

    /// Parse JSON text and decode the envelope.
    pub fn from_json(text: &str) -> Result<Self, CommandError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CommandError::Envelope { reason: e.to_string() })?;
        Self::decode(&value)
    }

    /// Tagged envelope for this command.
    pub fn to_value(&self) -> Value {
        let body = match self {
            Self::SetUser { user, token } => {
                serde_json::to_value(SessionPayload { user: user.clone(), token: token.clone() })
            },
            Self::Logout | Self::Unrecognized { .. } => Ok(Value::Null),
            Self::SetCompanies(items) => serde_json::to_value(items),
            Self::SetBuses(items) => serde_json::to_value(items),
            Self::SetSchedules(items) => serde_json::to_value(items),
            Self::SetReservations(items) => serde_json::to_value(items),
            Self::AddReservation(item) => serde_json::to_value(item),
            Self::SetPromotions(items) => serde_json::to_value(items),
            Self::SetNotifications(items) => serde_json::to_value(items),
            Self::SetChatMessages(items) => serde_json::to_value(items),
        };

        let mut envelope = Map::new();
        envelope.insert("type".into(), Value::String(self.tag().to_owned()));
        // Entity types serialize to plain objects; a failure here leaves the
        // payload null rather than dropping the tag.
        envelope.insert("payload".into(), body.unwrap_or(Value::Null));
        Value::Object(envelope)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_list_payload() {
        let command =
            Command::decode(&json!({"type": "SET_COMPANIES", "payload": [{"id": 1, "name": "A"}]}))
                .unwrap();

        let Command::SetCompanies(companies) = command else {
            panic!("expected SetCompanies, got {command:?}");
        };
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "A");
    }

    #[test]
    fn decodes_session_payload() {
        let command = Command::decode(&json!({
            "type": "SET_USER",
            "payload": {"user": {"id": 3, "username": "lan"}, "token": "abc"}
        }))
        .unwrap();

        assert_eq!(command.tag(), SET_USER);
        let Command::SetUser { user, token } = command else {
            panic!("expected SetUser");
        };
        assert_eq!(user.map(|u| u.username).as_deref(), Some("lan"));
        assert_eq!(token.as_deref(), Some("abc"));
    }

    #[test]
    fn session_payload_accepts_null_user() {
        let command =
            Command::decode(&json!({"type": "SET_USER", "payload": {"user": null, "token": null}}))
                .unwrap();

        assert_eq!(command, Command::SetUser { user: None, token: None });
        assert_eq!(Command::decode(&command.to_value()).unwrap(), command);
    }

    #[test]
    fn logout_needs_no_payload() {
        assert_eq!(Command::decode(&json!({"type": "LOGOUT"})).unwrap(), Command::Logout);
    }

    #[test]
    fn unknown_tag_is_unrecognized() {
        let command = Command::decode(&json!({"type": "SET_WEATHER", "payload": 42})).unwrap();

        assert_eq!(command, Command::Unrecognized { tag: "SET_WEATHER".into() });
        assert!(!command.is_recognized());
        assert!(command.targets().is_empty());
    }

    #[test]
    fn malformed_payload_for_known_tag() {
        let err = Command::decode(&json!({"type": "SET_BUSES", "payload": "nope"})).unwrap_err();
        assert!(matches!(err, CommandError::Payload { tag: SET_BUSES, .. }));
    }

    #[test]
    fn malformed_envelope() {
        assert!(matches!(Command::decode(&json!([1, 2])), Err(CommandError::Envelope { .. })));
        assert!(matches!(
            Command::decode(&json!({"payload": []})),
            Err(CommandError::Envelope { .. })
        ));
        assert!(matches!(Command::from_json("{"), Err(CommandError::Envelope { .. })));
    }

    #[test]
    fn envelope_carries_tag_and_payload() {
        let reservation = Reservation { id: 9, ..Reservation::default() };
        let value = Command::AddReservation(reservation.clone()).to_value();

        assert_eq!(value["type"], "ADD_RESERVATION");
        assert_eq!(value["payload"]["id"], 9);
        assert_eq!(Command::decode(&value).unwrap(), Command::AddReservation(reservation));
    }

    #[test]
    fn every_tag_is_recognized() {
        for tag in TAGS {
            let payload = match tag {
                SET_USER => json!({"user": {"id": 1}}),
                ADD_RESERVATION => json!({"id": 1}),
                LOGOUT => Value::Null,
                _ => json!([]),
            };
            let command = Command::decode(&json!({"type": tag, "payload": payload})).unwrap();
            assert_eq!(command.tag(), tag);
            assert!(command.is_recognized());
        }
    }
}
