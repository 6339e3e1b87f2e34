//! View flows.
//!
//! [`Runtime`] owns the [`Store`] and the [`ApiClient`] and runs the flows the
//! views trigger: issue the remote calls, then dispatch the resulting command.
//!
//! A failed call leaves the snapshot as it was and hands the error back.
//! Calls whose results are not cached (details, seat maps, payments, routes)
//! go straight through [`Runtime::client`].

use std::sync::Arc;

use ticketweb_client::{ApiClient, ClientError, Transport};
use ticketweb_proto::{
    ChangePasswordRequest, NewChatMessage, NewReservation, ProfileUpdate, QueryParams,
    RegisterRequest, Reservation, User,
};

use crate::{Command, Snapshot, Store};

/// Store plus API client, driving the view flows.
#[derive(Debug)]
pub struct Runtime<T> {
    store: Store,
    client: ApiClient<T>,
}

impl<T: Transport> Runtime<T> {
    /// Runtime with an empty store.
    pub fn new(client: ApiClient<T>) -> Self {
        Self::with_store(client, Store::default())
    }

    /// Runtime around an existing store.
    pub fn with_store(client: ApiClient<T>, store: Store) -> Self {
        Self { store, client }
    }

    /// The store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.current()
    }

    /// The API client, for calls that do not touch the store.
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Apply a command directly.
    pub fn dispatch(&mut self, command: Command) -> Arc<Snapshot> {
        self.store.dispatch(command)
    }

    fn session_token(&self) -> Option<String> {
        self.client.config().token().map(str::to_owned)
    }

    /// Sign in and cache the profile.
    ///
    /// The client switches to the issued token before fetching the profile.
    /// If the profile fetch fails the previous token is restored.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Arc<Snapshot>, ClientError> {
        let issued = self.client.login(username, password).await?;
        let previous = self.session_token();

        self.client.set_token(Some(issued.access_token.clone()));
        match self.client.profile().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "signed in");
                let token = Some(issued.access_token);
                Ok(self.store.dispatch(Command::SetUser { user: Some(user), token }))
            },
            Err(err) => {
                self.client.set_token(previous);
                Err(err)
            },
        }
    }

    /// Drop the session. No remote call is made.
    pub fn logout(&mut self) -> Arc<Snapshot> {
        self.client.set_token(None);
        self.store.dispatch(Command::Logout)
    }

    /// Re-fetch the current account, keeping the session token.
    pub async fn refresh_profile(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let user = self.client.profile().await?;
        Ok(self.set_user(user))
    }

    /// Update the current account, keeping the session token.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
    ) -> Result<Arc<Snapshot>, ClientError> {
        let user = self.client.update_profile(update).await?;
        Ok(self.set_user(user))
    }

    fn set_user(&mut self, user: User) -> Arc<Snapshot> {
        let token = self.session_token();
        self.store.dispatch(Command::SetUser { user: Some(user), token })
    }

    /// Create an account. The session is not changed.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.client.register(request).await
    }

    /// Change the password. The session is not changed.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<serde_json::Value, ClientError> {
        self.client.change_password(request).await
    }

    /// Fetch and cache companies.
    pub async fn load_companies(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let companies = self.client.companies().await?;
        Ok(self.store.dispatch(Command::SetCompanies(companies)))
    }

    /// Fetch and cache buses matching `query`.
    pub async fn load_buses(&mut self, query: &QueryParams) -> Result<Arc<Snapshot>, ClientError> {
        let buses = self.client.buses(query).await?;
        Ok(self.store.dispatch(Command::SetBuses(buses)))
    }

    /// Fetch and cache schedules matching `query`.
    pub async fn load_schedules(
        &mut self,
        query: &QueryParams,
    ) -> Result<Arc<Snapshot>, ClientError> {
        let schedules = self.client.schedules(query).await?;
        Ok(self.store.dispatch(Command::SetSchedules(schedules)))
    }

    /// Fetch and cache the account's reservations.
    pub async fn load_reservations(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let reservations = self.client.user_reservations().await?;
        Ok(self.store.dispatch(Command::SetReservations(reservations)))
    }

    /// Book seats and append the new reservation.
    pub async fn book(&mut self, request: &NewReservation) -> Result<Reservation, ClientError> {
        let reservation = self.client.create_reservation(request).await?;
        self.store.dispatch(Command::AddReservation(reservation.clone()));
        Ok(reservation)
    }

    /// Fetch and cache promotions.
    pub async fn load_promotions(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let promotions = self.client.promotions().await?;
        Ok(self.store.dispatch(Command::SetPromotions(promotions)))
    }

    /// Fetch and cache notifications.
    pub async fn load_notifications(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let notifications = self.client.notifications().await?;
        Ok(self.store.dispatch(Command::SetNotifications(notifications)))
    }

    /// Fetch and cache the chat transcript.
    pub async fn load_chat(&mut self) -> Result<Arc<Snapshot>, ClientError> {
        let messages = self.client.chat_messages().await?;
        Ok(self.store.dispatch(Command::SetChatMessages(messages)))
    }

    /// Send a chat message, then reload the transcript.
    pub async fn send_chat(
        &mut self,
        message: &NewChatMessage,
    ) -> Result<Arc<Snapshot>, ClientError> {
        self.client.send_chat(message).await?;
        self.load_chat().await
    }
}
