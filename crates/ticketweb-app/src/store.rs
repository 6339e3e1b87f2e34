//! Snapshot store.
//!
//! [`reduce`] is the whole transition function: a pure map from the previous
//! snapshot and a command to the next snapshot. [`Store`] keeps the current
//! version, counts versions and publishes each new one to subscribers.
//!
//! There is exactly one writer. `dispatch` takes `&mut self`, so concurrent
//! dispatches cannot interleave; readers hold [`watch::Receiver`]s.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{Command, Snapshot};

/// Next snapshot after applying `command` to `state`.
///
/// Only the fields named by [`Command::targets`] change. An unrecognized
/// command yields a snapshot equal to `state`.
pub fn reduce(state: &Snapshot, command: Command) -> Snapshot {
    let mut next = state.clone();
    match command {
        Command::SetUser { user, token } => {
            next.user = user;
            next.token = token;
        },
        Command::Logout => {
            next.user = None;
            next.token = None;
        },
        Command::SetCompanies(companies) => next.companies = companies,
        Command::SetBuses(buses) => next.buses = buses,
        Command::SetSchedules(schedules) => next.schedules = schedules,
        Command::SetReservations(reservations) => next.reservations = reservations,
        Command::AddReservation(reservation) => next.reservations.push(reservation),
        Command::SetPromotions(promotions) => next.promotions = promotions,
        Command::SetNotifications(notifications) => next.notifications = notifications,
        Command::SetChatMessages(messages) => next.chat_messages = messages,
        Command::Unrecognized { .. } => {},
    }
    next
}

/// Holder of the current snapshot.
#[derive(Debug)]
pub struct Store {
    current: Arc<Snapshot>,
    version: u64,
    publisher: watch::Sender<Arc<Snapshot>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl Store {
    /// Store starting at `initial`, version 0.
    pub fn new(initial: Snapshot) -> Self {
        let current = Arc::new(initial);
        let (publisher, _) = watch::channel(Arc::clone(&current));
        Self { current, version: 0, publisher }
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Borrow the current snapshot without bumping the refcount.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Number of recognized commands applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Receiver that observes every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.publisher.subscribe()
    }

    /// Apply `command` and return the resulting snapshot.
    ///
    /// Unrecognized commands return the current snapshot as is: nothing is
    /// published and the version does not move.
    pub fn dispatch(&mut self, command: Command) -> Arc<Snapshot> {
        if !command.is_recognized() {
            tracing::debug!(command = command.tag(), "ignoring unrecognized command");
            return self.current();
        }

        let version = self.version + 1;
        tracing::debug!(command = command.tag(), version, "dispatch");

        let next = Arc::new(reduce(&self.current, command));
        self.current = Arc::clone(&next);
        self.version = version;
        self.publisher.send_replace(Arc::clone(&next));
        next
    }
}

#[cfg(test)]
mod tests {
    use ticketweb_proto::{Company, Reservation, User};

    use super::*;

    fn company(id: u64, name: &str) -> Company {
        Company { id, name: name.into(), ..Company::default() }
    }

    #[test]
    fn companies_then_reservation() {
        let mut store = Store::default();

        store.dispatch(Command::SetCompanies(vec![company(1, "A")]));
        let reservation = Reservation { id: 9, ..Reservation::default() };
        let snapshot = store.dispatch(Command::AddReservation(reservation));

        assert_eq!(snapshot.reservations.len(), 1);
        assert_eq!(snapshot.reservations[0].id, 9);
        assert_eq!(snapshot.companies, vec![company(1, "A")]);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn logout_clears_session() {
        let user = User { id: 1, username: "lan".into(), ..User::default() };
        let mut store = Store::default();

        store.dispatch(Command::SetUser { user: Some(user), token: Some("t".into()) });
        assert!(store.snapshot().is_authenticated());

        let snapshot = store.dispatch(Command::Logout);
        assert_eq!(snapshot.user, None);
        assert_eq!(snapshot.token, None);
    }

    #[test]
    fn logout_when_logged_out_is_harmless() {
        let snapshot = reduce(&Snapshot::default(), Command::Logout);
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn unrecognized_keeps_snapshot_and_version() {
        let mut store = Store::default();
        store.dispatch(Command::SetCompanies(vec![company(1, "A")]));
        let before = store.current();

        let after = store.dispatch(Command::Unrecognized { tag: "SET_WEATHER".into() });

        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn previous_snapshot_is_untouched() {
        let mut store = Store::default();
        let before = store.current();

        store.dispatch(Command::SetCompanies(vec![company(1, "A")]));

        assert!(before.companies.is_empty());
        assert_eq!(store.snapshot().companies.len(), 1);
    }

    #[test]
    fn subscribers_see_new_versions() {
        let mut store = Store::default();
        let mut receiver = store.subscribe();

        store.dispatch(Command::SetCompanies(vec![company(2, "B")]));

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().companies, vec![company(2, "B")]);
    }
}
