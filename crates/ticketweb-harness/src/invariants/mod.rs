//! Invariant checking for store transitions.
//!
//! Invariants are properties every dispatch must preserve. Unlike
//! example-based tests that check specific scenarios, they are checked
//! against every [`Transition`] a test produces, so property tests can drive
//! arbitrary command sequences through them.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let after = reduce(&before, command.clone());
//! registry.check_all(&Transition::new(&before, &command, &after))?;
//! ```

mod checks;

pub use checks::{
    AppendOnlyReservations, FieldLocality, LogoutClearsSession, ReplacementMatchesPayload,
    UnrecognizedIsNoop,
};
use ticketweb_app::{Command, Snapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// One dispatch: the snapshot before, the command and the snapshot after.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// Snapshot the command was applied to.
    pub before: &'a Snapshot,
    /// Command applied.
    pub command: &'a Command,
    /// Resulting snapshot.
    pub after: &'a Snapshot,
}

impl<'a> Transition<'a> {
    /// Transition from `before` to `after` under `command`.
    pub fn new(before: &'a Snapshot, command: &'a Command, after: &'a Snapshot) -> Self {
        Self { before, command, after }
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property every store transition must satisfy.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against one transition.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, transition: &Transition<'_>) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Use [`InvariantRegistry::standard()`] for the store invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the store invariants.
    ///
    /// Includes:
    /// - [`FieldLocality`]: untargeted fields never change
    /// - [`AppendOnlyReservations`]: adding a reservation appends exactly it
    /// - [`LogoutClearsSession`]: logout leaves no user and no token
    /// - [`UnrecognizedIsNoop`]: unknown tags change nothing
    /// - [`ReplacementMatchesPayload`]: replace commands install their payload
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(FieldLocality);
        registry.add(AppendOnlyReservations);
        registry.add(LogoutClearsSession);
        registry.add(UnrecognizedIsNoop);
        registry.add(ReplacementMatchesPayload);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against one transition.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, transition: &Transition<'_>) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(transition).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, transition: &Transition<'_>, context: &str) {
        if let Err(violations) = self.check_all(transition) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ticketweb_app::reduce;

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn logout_from_empty_passes_invariants() {
        let before = Snapshot::default();
        let command = Command::Logout;
        let after = reduce(&before, command.clone());

        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&Transition::new(&before, &command, &after)).is_ok());
    }

    #[test]
    fn tampered_transition_is_caught() {
        let before = Snapshot::default();
        let command = Command::Unrecognized { tag: "X".into() };
        let after = Snapshot { token: Some("leaked".into()), ..Snapshot::default() };

        let violations = InvariantRegistry::standard()
            .check_all(&Transition::new(&before, &command, &after))
            .unwrap_err();

        let names: Vec<_> = violations.iter().map(|v| v.invariant).collect();
        assert!(names.contains(&"field_locality"));
        assert!(names.contains(&"unrecognized_is_noop"));
    }
}
