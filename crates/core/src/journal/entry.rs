//! The journal entry (asiento) aggregate and its lifecycle.
//!
//! An entry owns its rows while they are edited and the transactions built
//! from them once validated. Every state change goes through one transition
//! function, which enforces the transition table, re-checks the balance when
//! entering `Confirmed` or later, and bumps the revision.

use chrono::NaiveDate;
use contable_shared::types::{Currency, FiscalPeriodId, JournalEntryId, OrganizationId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::JournalError;
use super::repository::JournalRepository;
use super::row::EntryRow;
use super::state::EntryState;
use super::validation::{JournalEntryValidator, ValidationResult};
use crate::amount::AmountParser;
use crate::fiscal::FiscalPeriod;
use crate::ledger::factory::TransactionFactory;
use crate::ledger::transaction::Transaction;
use crate::ledger::types::{Account, TransactionTotals};

/// Identifying data of an entry, copied onto each of its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHeader {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Sequential entry number shown to users.
    pub number: u32,
    /// Description (glosa).
    pub description: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Fiscal period the entry is dated in.
    pub period_id: FiscalPeriodId,
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    /// Sequential entry number.
    pub number: u32,
    /// Description (glosa).
    pub description: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Initial rows.
    #[serde(default)]
    pub rows: Vec<EntryRow>,
}

/// Collaborators and defaults used when validating an entry.
#[derive(Debug, Clone, Copy)]
pub struct PostingContext<'a> {
    /// Reads row amounts.
    pub parser: &'a AmountParser,
    /// Currency the transactions are recorded in.
    pub currency: Currency,
    /// User performing the posting.
    pub user: UserId,
}

/// A journal entry moving through `Draft → Validated → Confirmed → Saved → Finalized`.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    header: EntryHeader,
    rows: Vec<EntryRow>,
    transactions: Vec<Transaction>,
    state: EntryState,
    revision: u64,
    last_result: ValidationResult,
}

impl JournalEntry {
    /// Creates a draft entry dated within `period`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::PeriodClosed`] if the period is closed and
    /// [`JournalError::DateOutsidePeriod`] if the date falls outside it.
    pub fn open(input: NewJournalEntry, period: &FiscalPeriod) -> Result<Self, JournalError> {
        if !period.is_open() {
            return Err(JournalError::PeriodClosed(period.id));
        }
        if !period.contains_date(input.date) {
            return Err(JournalError::DateOutsidePeriod {
                date: input.date,
                period: period.id,
            });
        }

        let header = EntryHeader {
            id: JournalEntryId::new(),
            number: input.number,
            description: input.description,
            date: input.date,
            organization_id: period.organization_id,
            period_id: period.id,
        };
        debug!(entry_id = %header.id, number = header.number, "journal entry opened");

        Ok(Self {
            header,
            rows: input.rows,
            transactions: Vec::new(),
            state: EntryState::Draft,
            revision: 0,
            last_result: ValidationResult::ok(),
        })
    }

    /// Identifying data.
    #[must_use]
    pub fn header(&self) -> &EntryHeader {
        &self.header
    }

    /// Rows as last edited.
    #[must_use]
    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    /// Transactions built at validation; empty unless validated or later.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Counter bumped by every edit and transition.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Outcome of the most recent validation or balance re-check.
    #[must_use]
    pub fn last_result(&self) -> &ValidationResult {
        &self.last_result
    }

    /// Debit and credit sums over the entry's transactions.
    #[must_use]
    pub fn totals(&self) -> TransactionTotals {
        let (debit, credit) = self
            .transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), tx| {
                (d + tx.debit(), c + tx.credit())
            });
        TransactionTotals::new(debit, credit)
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::RowsFrozen`] unless the entry is Draft or Rejected.
    pub fn add_row(&mut self, row: EntryRow) -> Result<(), JournalError> {
        self.begin_edit()?;
        self.rows.push(row);
        self.revision += 1;
        Ok(())
    }

    /// Replaces the row at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::RowsFrozen`] unless the entry is Draft or Rejected,
    /// and [`JournalError::RowOutOfRange`] for a bad index.
    pub fn update_row(&mut self, index: usize, row: EntryRow) -> Result<(), JournalError> {
        self.check_index(index)?;
        self.begin_edit()?;
        self.rows[index] = row;
        self.revision += 1;
        Ok(())
    }

    /// Removes the row at `index` (0-based) and returns it.
    ///
    /// # Errors
    ///
    /// Same as [`update_row`](Self::update_row).
    pub fn remove_row(&mut self, index: usize) -> Result<EntryRow, JournalError> {
        self.check_index(index)?;
        self.begin_edit()?;
        let row = self.rows.remove(index);
        self.revision += 1;
        Ok(row)
    }

    /// Validates rows, resolves their accounts and builds the transactions.
    ///
    /// Moves the entry to `Validated` when every check passes and to `Rejected`
    /// otherwise; the returned result lists every failure either way.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidTransition`] unless the entry is Draft.
    pub fn validate<F>(
        &mut self,
        ctx: &PostingContext<'_>,
        account_lookup: F,
    ) -> Result<ValidationResult, JournalError>
    where
        F: Fn(&str) -> Option<Account>,
    {
        if self.state != EntryState::Draft {
            return Err(JournalError::InvalidTransition {
                from: self.state,
                to: EntryState::Validated,
            });
        }

        let outcome = JournalEntryValidator::new(ctx.parser).validate(&self.rows);
        let mut errors = outcome.result.into_errors();

        let mut accounts = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let account = row.trimmed_account_code().and_then(|code| match account_lookup(code) {
                None => {
                    errors.push(format!("Fila {}: la cuenta '{code}' no existe", index + 1));
                    None
                }
                Some(account) if account.currency != ctx.currency => {
                    errors.push(format!(
                        "Fila {}: la cuenta '{code}' está en {}, no en {}",
                        index + 1,
                        account.currency,
                        ctx.currency
                    ));
                    None
                }
                found => found,
            });
            accounts.push(account);
        }

        if !errors.is_empty() {
            let result = ValidationResult::from_errors(errors);
            debug!(entry_id = %self.header.id, errors = result.errors().len(), "journal entry failed validation");
            self.transactions.clear();
            self.last_result = result.clone();
            self.advance(EntryState::Rejected)?;
            return Ok(result);
        }

        let factory = TransactionFactory::new(ctx.parser);
        let transactions = self
            .rows
            .iter()
            .zip(accounts.iter().flatten())
            .map(|(row, account)| factory.create(row, account, &self.header, ctx.currency, ctx.user))
            .collect::<Result<Vec<_>, _>>()?;

        self.transactions = transactions;
        self.last_result = ValidationResult::ok();
        self.advance(EntryState::Validated)?;
        Ok(self.last_result.clone())
    }

    /// Accepts a validated entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::ConcurrentModification`] if `seen_revision` is
    /// stale, [`JournalError::InvalidTransition`] unless Validated, and
    /// [`JournalError::Unbalanced`] if the re-check fails, in which case the
    /// entry is moved to `Rejected`.
    pub fn confirm(&mut self, seen_revision: u64) -> Result<(), JournalError> {
        self.check_revision(seen_revision)?;
        self.advance(EntryState::Confirmed)
    }

    /// Persists a confirmed entry through `repository`.
    ///
    /// A failed save leaves the entry `Confirmed` so the call can be repeated.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Persistence`] when the repository fails, plus
    /// the errors of [`confirm`](Self::confirm) for revision, state and balance.
    pub fn save<R>(&mut self, repository: &R, seen_revision: u64) -> Result<(), JournalError>
    where
        R: JournalRepository + ?Sized,
    {
        self.check_revision(seen_revision)?;
        self.state.transition(EntryState::Saved)?;
        self.check_balance()?;

        if let Err(e) = repository.save(self) {
            warn!(
                entry_id = %self.header.id,
                error = %e,
                retryable = e.is_retryable(),
                "journal entry save failed"
            );
            return Err(e.into());
        }

        self.advance(EntryState::Saved)
    }

    /// Closes a saved entry for good. `period` must be the entry's own, and open.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::PeriodMismatch`] or [`JournalError::PeriodClosed`]
    /// for a wrong or closed period, plus revision and state errors.
    pub fn finalize(&mut self, period: &FiscalPeriod, seen_revision: u64) -> Result<(), JournalError> {
        self.check_revision(seen_revision)?;
        if period.id != self.header.period_id {
            return Err(JournalError::PeriodMismatch {
                expected: self.header.period_id,
                actual: period.id,
            });
        }
        if !period.is_open() {
            return Err(JournalError::PeriodClosed(period.id));
        }
        self.advance(EntryState::Finalized)
    }

    /// Fails unless the entry may still be deleted (not yet Saved).
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::CannotDelete`] once the entry is Saved.
    pub fn ensure_deletable(&self) -> Result<(), JournalError> {
        if self.state.is_deletable() {
            Ok(())
        } else {
            Err(JournalError::CannotDelete(self.state))
        }
    }

    /// The single transition function.
    fn advance(&mut self, to: EntryState) -> Result<(), JournalError> {
        let from = self.state;
        let next = from.transition(to)?;
        if next.requires_balance()
            && let Err(e) = self.check_balance()
        {
            warn!(entry_id = %self.header.id, %from, %to, "balance re-check failed");
            if from.can_transition_to(EntryState::Rejected) {
                self.transactions.clear();
                self.last_result = ValidationResult::failure("Total débitos y créditos no coinciden");
                self.state = EntryState::Rejected;
                self.revision += 1;
            }
            return Err(e);
        }

        self.state = next;
        self.revision += 1;
        info!(
            entry_id = %self.header.id,
            %from,
            to = %next,
            revision = self.revision,
            "journal entry state changed"
        );
        Ok(())
    }

    fn check_balance(&self) -> Result<(), JournalError> {
        let totals = self.totals();
        if totals.is_balanced {
            Ok(())
        } else {
            Err(JournalError::Unbalanced {
                debit: totals.debit,
                credit: totals.credit,
            })
        }
    }

    fn check_revision(&self, seen: u64) -> Result<(), JournalError> {
        if seen == self.revision {
            Ok(())
        } else {
            Err(JournalError::ConcurrentModification {
                expected: seen,
                actual: self.revision,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), JournalError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(JournalError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn begin_edit(&mut self) -> Result<(), JournalError> {
        match self.state {
            EntryState::Draft => Ok(()),
            EntryState::Rejected => {
                self.last_result = ValidationResult::ok();
                self.advance(EntryState::Draft)
            }
            state => Err(JournalError::RowsFrozen(state)),
        }
    }
}
