//! Typed API client.
//!
//! [`ApiClient`] pairs a [`ClientConfig`] with a [`Transport`]. [`ApiClient::call`]
//! is the raw directory surface: one endpoint in, one request out, the JSON
//! result handed back unaltered. The typed wrappers encode request payloads
//! and decode entities on top of it.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use ticketweb_proto::{
    AiSuggestRequest, Bus, ChangePasswordRequest, ChatMessage, Company, EntityId, ListResponse,
    LoginRequest, NewBus, NewChatMessage, NewCompany, NewPayment, NewReservation, Notification,
    Payment, ProfileUpdate, Promotion, QueryParams, RegisterRequest, Reservation, Route, Schedule,
    Seat, TokenResponse, User,
};

use crate::{ClientConfig, ClientError, Endpoint, Transport};

/// Client for the bus-ticketing API.
#[derive(Debug)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Client sending requests built from `config` through `transport`.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Configuration requests are built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the bearer credential used by subsequent requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.config.set_token(token);
    }

    /// Issue exactly one request for `endpoint` and return the JSON body.
    ///
    /// # Errors
    ///
    /// Whatever the transport reports, unaltered.
    pub async fn call(&self, endpoint: Endpoint) -> Result<Value, ClientError> {
        let request = endpoint.build(&self.config);
        let operation = request.operation;
        tracing::debug!(operation, method = %request.method, path = %request.path, "api request");

        let result = self.transport.execute(request).await;
        if let Err(err) = &result {
            tracing::warn!(operation, error = %err, "api request failed");
        }
        result
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R, ClientError> {
        let value = self.call(endpoint).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode { reason: e.to_string() })
    }

    async fn fetch_list<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Vec<R>, ClientError> {
        self.fetch::<ListResponse<R>>(endpoint).await.map(ListResponse::into_items)
    }

    /// Password grant. Uses the OAuth2 application credentials from the
    /// config. Does not switch the client's own credential.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let request = LoginRequest::password(username, password)
            .with_client(self.config.client_id.clone(), self.config.client_secret.clone());
        self.fetch(Endpoint::Login(encode(&request)?)).await
    }

    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.fetch(Endpoint::Register(encode(request)?)).await
    }

    /// Change the current account's password. Returns the server's reply.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<Value, ClientError> {
        self.call(Endpoint::ChangePassword(encode(request)?)).await
    }

    /// Current account.
    pub async fn profile(&self) -> Result<User, ClientError> {
        self.fetch(Endpoint::GetProfile).await
    }

    /// Update the current account.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        self.fetch(Endpoint::UpdateProfile(encode(update)?)).await
    }

    /// All companies.
    pub async fn companies(&self) -> Result<Vec<Company>, ClientError> {
        self.fetch_list(Endpoint::ListCompanies).await
    }

    /// One company.
    pub async fn company(&self, id: EntityId) -> Result<Company, ClientError> {
        self.fetch(Endpoint::CompanyDetail(id)).await
    }

    /// Register a company.
    pub async fn add_company(&self, company: &NewCompany) -> Result<Company, ClientError> {
        self.fetch(Endpoint::AddCompany(encode(company)?)).await
    }

    /// Buses matching `query`.
    pub async fn buses(&self, query: &QueryParams) -> Result<Vec<Bus>, ClientError> {
        self.fetch_list(Endpoint::ListBuses(query.clone())).await
    }

    /// One bus.
    pub async fn bus(&self, id: EntityId) -> Result<Bus, ClientError> {
        self.fetch(Endpoint::BusDetail(id)).await
    }

    /// Register a bus.
    pub async fn add_bus(&self, bus: &NewBus) -> Result<Bus, ClientError> {
        self.fetch(Endpoint::AddBus(encode(bus)?)).await
    }

    /// All routes.
    pub async fn routes(&self) -> Result<Vec<Route>, ClientError> {
        self.fetch_list(Endpoint::ListRoutes).await
    }

    /// One route.
    pub async fn route(&self, id: EntityId) -> Result<Route, ClientError> {
        self.fetch(Endpoint::RouteDetail(id)).await
    }

    /// Schedules matching `query`.
    pub async fn schedules(&self, query: &QueryParams) -> Result<Vec<Schedule>, ClientError> {
        self.fetch_list(Endpoint::ListSchedules(query.clone())).await
    }

    /// One schedule.
    pub async fn schedule(&self, id: EntityId) -> Result<Schedule, ClientError> {
        self.fetch(Endpoint::ScheduleDetail(id)).await
    }

    /// Seat map of a schedule.
    pub async fn seats(&self, schedule: EntityId) -> Result<Vec<Seat>, ClientError> {
        self.fetch_list(Endpoint::ScheduleSeats(schedule)).await
    }

    /// Book seats.
    pub async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, ClientError> {
        self.fetch(Endpoint::CreateReservation(encode(reservation)?)).await
    }

    /// Reservations of the current account.
    pub async fn user_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        self.fetch_list(Endpoint::ListUserReservations).await
    }

    /// One reservation.
    pub async fn reservation(&self, id: EntityId) -> Result<Reservation, ClientError> {
        self.fetch(Endpoint::ReservationDetail(id)).await
    }

    /// Pay for a reservation.
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, ClientError> {
        self.fetch(Endpoint::CreatePayment(encode(payment)?)).await
    }

    /// One payment.
    pub async fn payment(&self, id: EntityId) -> Result<Payment, ClientError> {
        self.fetch(Endpoint::PaymentDetail(id)).await
    }

    /// All promotions.
    pub async fn promotions(&self) -> Result<Vec<Promotion>, ClientError> {
        self.fetch_list(Endpoint::ListPromotions).await
    }

    /// Validate a discount code. Returns the server's verdict as sent.
    pub async fn check_promotion(&self, code: &str) -> Result<Value, ClientError> {
        self.call(Endpoint::CheckPromotion(code.to_owned())).await
    }

    /// Notifications of the current account.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        self.fetch_list(Endpoint::ListNotifications).await
    }

    /// Chat transcript.
    pub async fn chat_messages(&self) -> Result<Vec<ChatMessage>, ClientError> {
        self.fetch_list(Endpoint::ChatMessages).await
    }

    /// Send a chat message.
    pub async fn send_chat(&self, message: &NewChatMessage) -> Result<ChatMessage, ClientError> {
        self.fetch(Endpoint::SendChat(encode(message)?)).await
    }

    /// Ask the assistant for a reply suggestion.
    pub async fn ai_suggest(&self, request: &AiSuggestRequest) -> Result<Value, ClientError> {
        self.call(Endpoint::AiSuggest(encode(request)?)).await
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, ClientError> {
    serde_json::to_value(payload).map_err(|e| ClientError::Encode { reason: e.to_string() })
}
