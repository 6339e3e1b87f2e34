//! Payloads sent to the API.
//!
//! Optional fields are omitted from the JSON body when `None`, so partial
//! updates only touch the fields the caller set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Amount, BusStatus, EntityId, PaymentMethod, Role};

/// OAuth2 password-grant request for `o/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Always `"password"`.
    pub grant_type: String,
    /// Account login name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// OAuth2 application id registered on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth2 application secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl LoginRequest {
    /// Password grant for the given credentials.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            grant_type: "password".to_owned(),
            username: username.into(),
            password: password.into(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Attach the OAuth2 application credentials.
    #[must_use]
    pub fn with_client(mut self, client_id: Option<String>, client_secret: Option<String>) -> Self {
        self.client_id = client_id;
        self.client_secret = client_secret;
        self
    }
}

/// Token issued by `o/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer credential for subsequent requests.
    pub access_token: String,
    /// Token scheme, normally `"Bearer"`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Credential for refreshing the access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
}

/// New account registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Must equal `password`; checked by the server.
    pub confirm_password: String,
    /// Contact email, unique.
    pub email: String,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Requested role. The server decides the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Password change for the current account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Password in use now.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
    /// Must equal `new_password`; checked by the server.
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    /// Change from `current` to `new`, with the confirmation filled in.
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Self {
        let new = new.into();
        Self { current_password: current.into(), confirm_password: new.clone(), new_password: new }
    }
}

/// Partial update of the current account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// New bus company.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewCompany {
    /// Trading name.
    pub name: String,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Rich-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// New bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBus {
    /// Owning company.
    pub company: EntityId,
    /// Registration plate.
    pub license_plate: String,
    /// Seat count. The server defaults to 45.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u16>,
    /// Initial status. The server defaults to active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BusStatus>,
}

/// Seat booking on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    /// Trip to book.
    pub schedule: EntityId,
    /// Seats to hold.
    pub seats: Vec<EntityId>,
    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Discount code to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
}

/// Payment against a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    /// Reservation to pay for.
    pub reservation: EntityId,
    /// Amount paid.
    pub amount: Amount,
    /// Payment channel.
    pub payment_method: PaymentMethod,
}

/// Outgoing chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatMessage {
    /// Recipient account.
    pub receiver: EntityId,
    /// Message text.
    pub message: String,
}

/// Prompt for the assistant's reply suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestRequest {
    /// Text the suggestion should answer.
    pub message: String,
}

/// Query-string filters for list endpoints.
///
/// Keys are kept sorted so the same filters always produce the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a filter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Whether no filters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Filters as `(key, value)` pairs, sorted by key.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn login_omits_missing_client_credentials() {
        let body = serde_json::to_value(LoginRequest::password("lan", "secret")).unwrap();
        assert_eq!(
            body,
            json!({"grant_type": "password", "username": "lan", "password": "secret"})
        );
    }

    #[test]
    fn change_password_fills_confirmation() {
        let request = ChangePasswordRequest::new("old", "new");
        assert_eq!(request.confirm_password, "new");
        assert_eq!(request.new_password, "new");
    }

    #[test]
    fn query_params_sorted_by_key() {
        let params = QueryParams::new().with("route", 3).with("date", "2025-06-01");
        assert_eq!(params.pairs(), vec![
            ("date".to_owned(), "2025-06-01".to_owned()),
            ("route".to_owned(), "3".to_owned()),
        ]);
    }

    #[test]
    fn payment_serializes_method_and_amount() {
        let body = serde_json::to_value(NewPayment {
            reservation: 9,
            amount: Amount::from("300000.00"),
            payment_method: PaymentMethod::Momo,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"reservation": 9, "amount": "300000.00", "payment_method": "momo"})
        );
    }
}
