//! Journal entry error types.

use chrono::NaiveDate;
use contable_shared::types::FiscalPeriodId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::repository::PersistenceError;
use super::state::EntryState;
use crate::ledger::error::{FactoryError, ReportError};

/// Errors raised while moving a journal entry through its lifecycle.
///
/// Row and balance problems found during validation are reported as a
/// `ValidationResult`, not through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// The requested state change is not in the transition table.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        /// Current state.
        from: EntryState,
        /// Requested state.
        to: EntryState,
    },

    /// The entry changed since the caller last looked at it.
    #[error("Journal entry was modified concurrently: expected revision {expected}, found {actual}")]
    ConcurrentModification {
        /// Revision the caller observed.
        expected: u64,
        /// Current revision.
        actual: u64,
    },

    /// Debits and credits differ at a balance re-check.
    #[error("Journal entry is unbalanced: debits ({debit}) != credits ({credit})")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// The owning fiscal period is closed.
    #[error("Fiscal period is closed: {0}")]
    PeriodClosed(FiscalPeriodId),

    /// The entry date falls outside its fiscal period.
    #[error("Date {date} is outside fiscal period {period}")]
    DateOutsidePeriod {
        /// Entry date.
        date: NaiveDate,
        /// Period checked against.
        period: FiscalPeriodId,
    },

    /// A different fiscal period was supplied than the one owning the entry.
    #[error("Journal entry belongs to fiscal period {expected}, got {actual}")]
    PeriodMismatch {
        /// Owning period.
        expected: FiscalPeriodId,
        /// Supplied period.
        actual: FiscalPeriodId,
    },

    /// Rows cannot change in the current state.
    #[error("Rows cannot be edited in state {0}")]
    RowsFrozen(EntryState),

    /// A row index past the end of the entry.
    #[error("Row index {index} out of range for {len} rows")]
    RowOutOfRange {
        /// Requested index (0-based).
        index: usize,
        /// Number of rows.
        len: usize,
    },

    /// The entry can no longer be deleted.
    #[error("Journal entry in state {0} cannot be deleted")]
    CannotDelete(EntryState),

    /// A validated row could not be turned into a transaction.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// Saving or loading failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Rebuilding a ledger report failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::DateOutsidePeriod { .. } => "DATE_OUTSIDE_PERIOD",
            Self::PeriodMismatch { .. } => "PERIOD_MISMATCH",
            Self::RowsFrozen(_) => "ROWS_FROZEN",
            Self::RowOutOfRange { .. } => "ROW_OUT_OF_RANGE",
            Self::CannotDelete(_) => "CANNOT_DELETE",
            Self::Factory(e) => e.error_code(),
            Self::Persistence(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConcurrentModification { .. } => true,
            Self::Persistence(e) => e.is_retryable(),
            Self::Report(e) => e.is_retryable(),
            _ => false,
        }
    }
}
