//! Lifecycle states of a journal entry.

use serde::{Deserialize, Serialize};

use super::error::JournalError;

/// Where a journal entry is in its lifecycle.
///
/// ```text
/// Draft ──▶ Validated ──▶ Confirmed ──▶ Saved ──▶ Finalized
///   ▲  ╲        │
///   │   ╲       ▼
///   └──── Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Being edited; not yet checked.
    #[default]
    Draft,
    /// Rows and balance passed validation.
    Validated,
    /// Validation or a balance re-check failed; editable again.
    Rejected,
    /// Accepted by the user, awaiting persistence.
    Confirmed,
    /// Persisted.
    Saved,
    /// Closed for good. Terminal.
    Finalized,
}

impl EntryState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Validated,
        Self::Rejected,
        Self::Confirmed,
        Self::Saved,
        Self::Finalized,
    ];

    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Confirmed => "confirmed",
            Self::Saved => "saved",
            Self::Finalized => "finalized",
        }
    }

    /// Parses a state from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Returns true if rows may be added, changed or removed.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if entering this state requires debits to equal credits.
    #[must_use]
    pub fn requires_balance(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Saved | Self::Finalized)
    }

    /// Returns true if the entry may still be deleted.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        !matches!(self, Self::Saved | Self::Finalized)
    }

    /// Returns true if no transition leaves this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized)
    }

    /// Returns true if moving from `self` to `to` is a legal transition.
    #[must_use]
    pub fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Confirmed | Self::Rejected)
                | (Self::Rejected, Self::Draft)
                | (Self::Confirmed, Self::Saved)
                | (Self::Saved, Self::Finalized)
        )
    }

    /// Returns `to` if the transition is legal.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidTransition`] otherwise.
    pub fn transition(self, to: Self) -> Result<Self, JournalError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(JournalError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
