//! Remote endpoint directory.
//!
//! Static catalog mapping each logical API operation to an HTTP method and a
//! path template. [`Endpoint`] carries the arguments of one call;
//! [`Endpoint::build`] turns it into a transport-agnostic [`HttpRequest`].
//!
//! The directory holds no state and performs no I/O. Paths are relative to the
//! configured API root and keep the server's trailing slashes.

use std::fmt;

use serde_json::Value;
use ticketweb_proto::{EntityId, QueryParams};

use crate::ClientConfig;

/// HTTP method used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry: operation name, method and path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Dotted operation name, e.g. `companies.add`.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path template relative to the API root. `{id}` and `{code}` are
    /// substituted per call.
    pub path: &'static str,
}

macro_rules! operations {
    ($($ident:ident => $name:literal, $method:ident, $path:literal;)*) => {
        $(
            const $ident: Operation =
                Operation { name: $name, method: Method::$method, path: $path };
        )*

        /// Every operation in the catalog, in declaration order.
        pub const OPERATIONS: &[Operation] = &[$($ident),*];
    };
}

operations! {
    LOGIN => "auth.login", Post, "o/token/";
    REGISTER => "auth.register", Post, "auth/register/";
    CHANGE_PASSWORD => "auth.changePassword", Put, "auth/change-password/";
    GET_PROFILE => "auth.getProfile", Get, "users/me/";
    UPDATE_PROFILE => "auth.updateProfile", Put, "users/me/";
    COMPANIES_LIST => "companies.list", Get, "companies/";
    COMPANIES_DETAIL => "companies.detail", Get, "companies/{id}/";
    COMPANIES_ADD => "companies.add", Post, "companies/";
    BUSES_LIST => "buses.list", Get, "buses/";
    BUSES_DETAIL => "buses.detail", Get, "buses/{id}/";
    BUSES_ADD => "buses.add", Post, "buses/";
    ROUTES_LIST => "routes.list", Get, "routes/";
    ROUTES_DETAIL => "routes.detail", Get, "routes/{id}/";
    SCHEDULES_LIST => "schedules.list", Get, "schedules/";
    SCHEDULES_DETAIL => "schedules.detail", Get, "schedules/{id}/";
    SCHEDULES_SEATS => "schedules.seats", Get, "schedules/{id}/seats/";
    RESERVATIONS_CREATE => "reservations.create", Post, "reservations/";
    RESERVATIONS_LIST_USER => "reservations.listUser", Get, "reservations/user/";
    RESERVATIONS_DETAIL => "reservations.detail", Get, "reservations/{id}/";
    PAYMENTS_CREATE => "payments.create", Post, "payments/";
    PAYMENTS_DETAIL => "payments.detail", Get, "payments/{id}/";
    PROMOTIONS_LIST => "promotions.list", Get, "promotions/";
    PROMOTIONS_CHECK => "promotions.check", Get, "promotions/{code}/check/";
    NOTIFICATIONS_LIST => "notifications.list", Get, "notifications/";
    CHAT_MESSAGES => "chat.messages", Get, "chat/messages/";
    CHAT_SEND => "chat.send", Post, "chat/messages/";
    CHAT_AI_SUGGEST => "chat.aiSuggest", Post, "chat/ai-suggest/";
}

/// One call against the remote API, with its arguments.
///
/// Bodies are opaque JSON: the directory forwards whatever the caller built.
/// Typed payloads are encoded by [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// `auth.login`: exchange credentials for a token.
    Login(Value),
    /// `auth.register`: create an account.
    Register(Value),
    /// `auth.changePassword`: change the current account's password.
    ChangePassword(Value),
    /// `auth.getProfile`: current account.
    GetProfile,
    /// `auth.updateProfile`: update the current account.
    UpdateProfile(Value),
    /// `companies.list`
    ListCompanies,
    /// `companies.detail`
    CompanyDetail(EntityId),
    /// `companies.add`
    AddCompany(Value),
    /// `buses.list`, filtered by query parameters.
    ListBuses(QueryParams),
    /// `buses.detail`
    BusDetail(EntityId),
    /// `buses.add`
    AddBus(Value),
    /// `routes.list`
    ListRoutes,
    /// `routes.detail`
    RouteDetail(EntityId),
    /// `schedules.list`, filtered by query parameters.
    ListSchedules(QueryParams),
    /// `schedules.detail`
    ScheduleDetail(EntityId),
    /// `schedules.seats`: seat map of one schedule.
    ScheduleSeats(EntityId),
    /// `reservations.create`
    CreateReservation(Value),
    /// `reservations.listUser`: reservations of the current account.
    ListUserReservations,
    /// `reservations.detail`
    ReservationDetail(EntityId),
    /// `payments.create`
    CreatePayment(Value),
    /// `payments.detail`
    PaymentDetail(EntityId),
    /// `promotions.list`
    ListPromotions,
    /// `promotions.check`: validate a discount code.
    CheckPromotion(String),
    /// `notifications.list`
    ListNotifications,
    /// `chat.messages`: chat transcript.
    ChatMessages,
    /// `chat.send`
    SendChat(Value),
    /// `chat.aiSuggest`: assistant reply suggestion.
    AiSuggest(Value),
}

impl Endpoint {
    /// Catalog entry for this call.
    pub fn operation(&self) -> &'static Operation {
        match self {
            Self::Login(_) => &LOGIN,
            Self::Register(_) => &REGISTER,
            Self::ChangePassword(_) => &CHANGE_PASSWORD,
            Self::GetProfile => &GET_PROFILE,
            Self::UpdateProfile(_) => &UPDATE_PROFILE,
            Self::ListCompanies => &COMPANIES_LIST,
            Self::CompanyDetail(_) => &COMPANIES_DETAIL,
            Self::AddCompany(_) => &COMPANIES_ADD,
            Self::ListBuses(_) => &BUSES_LIST,
            Self::BusDetail(_) => &BUSES_DETAIL,
            Self::AddBus(_) => &BUSES_ADD,
            Self::ListRoutes => &ROUTES_LIST,
            Self::RouteDetail(_) => &ROUTES_DETAIL,
            Self::ListSchedules(_) => &SCHEDULES_LIST,
            Self::ScheduleDetail(_) => &SCHEDULES_DETAIL,
            Self::ScheduleSeats(_) => &SCHEDULES_SEATS,
            Self::CreateReservation(_) => &RESERVATIONS_CREATE,
            Self::ListUserReservations => &RESERVATIONS_LIST_USER,
            Self::ReservationDetail(_) => &RESERVATIONS_DETAIL,
            Self::CreatePayment(_) => &PAYMENTS_CREATE,
            Self::PaymentDetail(_) => &PAYMENTS_DETAIL,
            Self::ListPromotions => &PROMOTIONS_LIST,
            Self::CheckPromotion(_) => &PROMOTIONS_CHECK,
            Self::ListNotifications => &NOTIFICATIONS_LIST,
            Self::ChatMessages => &CHAT_MESSAGES,
            Self::SendChat(_) => &CHAT_SEND,
            Self::AiSuggest(_) => &CHAT_AI_SUGGEST,
        }
    }

    /// Dotted operation name, e.g. `companies.add`.
    pub fn name(&self) -> &'static str {
        self.operation().name
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.operation().method
    }

    /// Path relative to the API root, with parameters substituted.
    pub fn path(&self) -> String {
        let template = self.operation().path;
        match self {
            Self::CompanyDetail(id)
            | Self::BusDetail(id)
            | Self::RouteDetail(id)
            | Self::ScheduleDetail(id)
            | Self::ScheduleSeats(id)
            | Self::ReservationDetail(id)
            | Self::PaymentDetail(id) => template.replace("{id}", &id.to_string()),
            Self::CheckPromotion(code) => template.replace("{code}", &urlencoding::encode(code)),
            _ => template.to_owned(),
        }
    }

    /// Whether the bearer credential is attached.
    ///
    /// Login goes out without it: the token endpoint authenticates the
    /// credentials in the body, and a stale token must not interfere.
    pub fn sends_credential(&self) -> bool {
        !matches!(self, Self::Login(_))
    }

    /// Build the request descriptor for this call.
    pub fn build(self, config: &ClientConfig) -> HttpRequest {
        let operation = self.operation();
        let path = self.path();
        let sends_credential = self.sends_credential();

        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if sends_credential && let Some(authorization) = config.authorization() {
            headers.push(("Authorization".to_owned(), authorization));
        }

        let (query, body) = match self {
            Self::ListBuses(params) | Self::ListSchedules(params) => (params.pairs(), None),
            Self::Login(body)
            | Self::Register(body)
            | Self::ChangePassword(body)
            | Self::UpdateProfile(body)
            | Self::AddCompany(body)
            | Self::AddBus(body)
            | Self::CreateReservation(body)
            | Self::CreatePayment(body)
            | Self::SendChat(body)
            | Self::AiSuggest(body) => (Vec::new(), Some(body)),
            Self::GetProfile
            | Self::ListCompanies
            | Self::CompanyDetail(_)
            | Self::BusDetail(_)
            | Self::ListRoutes
            | Self::RouteDetail(_)
            | Self::ScheduleDetail(_)
            | Self::ScheduleSeats(_)
            | Self::ListUserReservations
            | Self::ReservationDetail(_)
            | Self::PaymentDetail(_)
            | Self::ListPromotions
            | Self::CheckPromotion(_)
            | Self::ListNotifications
            | Self::ChatMessages => (Vec::new(), None),
        };

        HttpRequest {
            operation: operation.name,
            method: operation.method,
            path,
            query,
            headers,
            body,
        }
    }
}

/// Transport-agnostic HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Dotted operation name, for logging.
    pub operation: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API root.
    pub path: String,
    /// Query-string pairs.
    pub query: Vec<(String, String)>,
    /// Header pairs.
    pub headers: Vec<(String, String)>,
    /// JSON body. `None` for requests without one.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Value of the named header (case-insensitive). `None` if absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    fn logged_in() -> ClientConfig {
        ClientConfig::default().with_token(Some("tok".into()))
    }

    #[test]
    fn operation_names_are_unique() {
        let names: HashSet<_> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
        assert_eq!(OPERATIONS.len(), 27);
    }

    #[test]
    fn path_parameters_substituted() {
        assert_eq!(Endpoint::CompanyDetail(5).path(), "companies/5/");
        assert_eq!(Endpoint::ScheduleSeats(12).path(), "schedules/12/seats/");
        assert_eq!(Endpoint::PaymentDetail(3).path(), "payments/3/");
    }

    #[test]
    fn promotion_code_is_percent_encoded() {
        let endpoint = Endpoint::CheckPromotion("SUMMER 25/%".into());
        assert_eq!(endpoint.path(), "promotions/SUMMER%2025%2F%25/check/");
    }

    #[test]
    fn login_never_sends_credential() {
        let request = Endpoint::Login(json!({"username": "lan"})).build(&logged_in());

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "o/token/");
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.body, Some(json!({"username": "lan"})));
    }

    #[test]
    fn authenticated_request_carries_bearer() {
        let request = Endpoint::GetProfile.build(&logged_in());

        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body, None);
    }

    #[test]
    fn logged_out_request_has_no_authorization_header() {
        let request = Endpoint::ListCompanies.build(&ClientConfig::default());
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn list_filters_become_query() {
        let params = QueryParams::new().with("company", 2).with("status", "active");
        let request = Endpoint::ListBuses(params).build(&logged_in());

        assert_eq!(request.path, "buses/");
        assert_eq!(request.query, vec![
            ("company".to_owned(), "2".to_owned()),
            ("status".to_owned(), "active".to_owned()),
        ]);
        assert_eq!(request.body, None);
    }
}
