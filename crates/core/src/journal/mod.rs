//! Journal entries (asientos): rows, validation, lifecycle and persistence.
//!
//! - Rows as typed by users and their validation rules
//! - The entry aggregate and its state machine
//! - The persistence collaborator
//! - A posting service tying them to ledger refreshes

pub mod entry;
pub mod error;
pub mod repository;
pub mod row;
pub mod service;
pub mod state;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use entry::{EntryHeader, JournalEntry, NewJournalEntry, PostingContext};
pub use error::JournalError;
pub use repository::{InMemoryJournalRepository, JournalRepository, PersistenceError};
pub use row::{AuxiliaryCodes, EntryRow};
pub use service::{PostingOutcome, PostingService};
pub use state::EntryState;
pub use validation::{
    EntryValidation, JournalEntryValidator, ProcessingResult, RowValidator, ValidationResult,
};
