//! Standard store invariants.
//!
//! These capture what must hold after every dispatch, whatever the command
//! sequence that led there.

use ticketweb_app::{Command, Field};

use super::{Invariant, InvariantResult, Transition, Violation};

/// A command changes only the fields it targets.
///
/// Every field outside [`Command::targets`] must compare equal before and
/// after. Catches reducers that reset or leak unrelated state.
pub struct FieldLocality;

impl Invariant for FieldLocality {
    fn name(&self) -> &'static str {
        "field_locality"
    }

    fn check(&self, t: &Transition<'_>) -> InvariantResult {
        let targets = t.command.targets();
        for field in Field::ALL {
            if !targets.contains(&field) && !t.before.field_eq(t.after, field) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("{} changed {field}", t.command.tag()),
                });
            }
        }
        Ok(())
    }
}

/// `ADD_RESERVATION` appends exactly its payload.
///
/// The new list is the old list followed by the added item, order kept.
pub struct AppendOnlyReservations;

impl Invariant for AppendOnlyReservations {
    fn name(&self) -> &'static str {
        "append_only_reservations"
    }

    fn check(&self, t: &Transition<'_>) -> InvariantResult {
        let Command::AddReservation(added) = t.command else {
            return Ok(());
        };

        let before = &t.before.reservations;
        let after = &t.after.reservations;
        let appended = after.len() == before.len() + 1
            && after[..before.len()] == before[..]
            && after.last() == Some(added);

        if appended {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!(
                    "reservation {} not appended: {} before, {} after",
                    added.id,
                    before.len(),
                    after.len()
                ),
            })
        }
    }
}

/// `LOGOUT` leaves no user and no token, whatever came before.
pub struct LogoutClearsSession;

impl Invariant for LogoutClearsSession {
    fn name(&self) -> &'static str {
        "logout_clears_session"
    }

    fn check(&self, t: &Transition<'_>) -> InvariantResult {
        if !matches!(t.command, Command::Logout) {
            return Ok(());
        }
        if t.after.user.is_some() || t.after.token.is_some() {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "session survived logout: user={:?} token_present={}",
                    t.after.user.as_ref().map(|u| u.id),
                    t.after.token.is_some()
                ),
            });
        }
        Ok(())
    }
}

/// An unrecognized tag yields a snapshot equal to its input.
pub struct UnrecognizedIsNoop;

impl Invariant for UnrecognizedIsNoop {
    fn name(&self) -> &'static str {
        "unrecognized_is_noop"
    }

    fn check(&self, t: &Transition<'_>) -> InvariantResult {
        if t.command.is_recognized() || t.before == t.after {
            return Ok(());
        }
        Err(Violation {
            invariant: self.name(),
            message: format!("unrecognized tag {} changed the snapshot", t.command.tag()),
        })
    }
}

/// Replace commands install their payload verbatim.
pub struct ReplacementMatchesPayload;

impl Invariant for ReplacementMatchesPayload {
    fn name(&self) -> &'static str {
        "replacement_matches_payload"
    }

    fn check(&self, t: &Transition<'_>) -> InvariantResult {
        let after = t.after;
        let installed = match t.command {
            Command::SetUser { user, token } => {
                after.user == *user && after.token == *token
            },
            Command::SetCompanies(items) => after.companies == *items,
            Command::SetBuses(items) => after.buses == *items,
            Command::SetSchedules(items) => after.schedules == *items,
            Command::SetReservations(items) => after.reservations == *items,
            Command::SetPromotions(items) => after.promotions == *items,
            Command::SetNotifications(items) => after.notifications == *items,
            Command::SetChatMessages(items) => after.chat_messages == *items,
            Command::Logout | Command::AddReservation(_) | Command::Unrecognized { .. } => true,
        };

        if installed {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!("{} did not install its payload", t.command.tag()),
            })
        }
    }
}
