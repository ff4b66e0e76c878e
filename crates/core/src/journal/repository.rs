//! Persistence collaborator for journal entries.
//!
//! The engine never talks to storage directly; it hands confirmed entries to a
//! [`JournalRepository`] and reads account history back through it.

use std::sync::atomic::{AtomicU64, Ordering};

use contable_shared::types::{AccountId, DateRange, JournalEntryId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

use super::entry::JournalEntry;
use crate::ledger::transaction::Transaction;

/// Errors raised by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached. Retrying may succeed.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// An entry with this ID was already saved.
    #[error("Journal entry already saved: {0}")]
    Conflict(JournalEntryId),

    /// The store rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Conflict(_) => "ENTRY_ALREADY_SAVED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Storage for saved entries and the transactions they posted.
pub trait JournalRepository: Send + Sync {
    /// Persists an entry together with its transactions.
    fn save(&self, entry: &JournalEntry) -> Result<(), PersistenceError>;

    /// Loads the transactions posted to `account` within `range`, ordered by
    /// date and then by the order they were saved.
    fn load(&self, account: AccountId, range: DateRange)
    -> Result<Vec<Transaction>, PersistenceError>;
}

#[derive(Debug)]
struct StoredEntry {
    sequence: u64,
    transactions: Vec<Transaction>,
}

/// Process-local repository backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryJournalRepository {
    entries: DashMap<JournalEntryId, StoredEntry>,
    next_sequence: AtomicU64,
}

impl InMemoryJournalRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the entry has been saved.
    #[must_use]
    pub fn contains(&self, id: JournalEntryId) -> bool {
        self.entries.contains_key(&id)
    }
}

impl JournalRepository for InMemoryJournalRepository {
    fn save(&self, entry: &JournalEntry) -> Result<(), PersistenceError> {
        let id = entry.header().id;
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(PersistenceError::Conflict(id)),
            Entry::Vacant(slot) => {
                slot.insert(StoredEntry {
                    sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
                    transactions: entry.transactions().to_vec(),
                });
                Ok(())
            }
        }
    }

    fn load(
        &self,
        account: AccountId,
        range: DateRange,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        let mut found: Vec<(u64, usize, Transaction)> = self
            .entries
            .iter()
            .flat_map(|stored| {
                let sequence = stored.sequence;
                stored
                    .transactions
                    .iter()
                    .enumerate()
                    .filter(|(_, tx)| tx.account_id() == account && range.contains(tx.date()))
                    .map(|(index, tx)| (sequence, index, tx.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        found.sort_by(|a, b| (a.2.date(), a.0, a.1).cmp(&(b.2.date(), b.0, b.1)));
        Ok(found.into_iter().map(|(_, _, tx)| tx).collect())
    }
}
