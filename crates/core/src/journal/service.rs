//! Posting service: validate, confirm, save and refresh ledgers in one call.

use contable_shared::types::DateRange;
use serde::Serialize;
use tracing::info;

use super::entry::{JournalEntry, PostingContext};
use super::error::JournalError;
use super::repository::JournalRepository;
use super::validation::ValidationResult;
use crate::ledger::aggregator::{LedgerAggregator, LibroMayorReport};
use crate::ledger::chart::ChartOfAccounts;

/// Result of posting an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum PostingOutcome {
    /// Validation failed; the entry is Rejected and nothing was saved.
    Rejected(ValidationResult),
    /// Saved; the refreshed reports of every affected account.
    Posted(Vec<LibroMayorReport>),
}

/// Drives a draft entry through validation, confirmation and persistence.
pub struct PostingService;

impl PostingService {
    /// Posts a draft `entry` against `chart`, saving through `repository`.
    ///
    /// Ledger reports are rebuilt from `range` of each affected account's
    /// history, starting from the chart's opening balances.
    ///
    /// # Errors
    ///
    /// Returns a [`JournalError`] for illegal transitions, a failed save or a
    /// failed report refresh. A persistence failure leaves the entry
    /// Confirmed so `save` can be retried.
    pub fn post<R>(
        entry: &mut JournalEntry,
        ctx: &PostingContext<'_>,
        repository: &R,
        chart: &ChartOfAccounts,
        range: DateRange,
    ) -> Result<PostingOutcome, JournalError>
    where
        R: JournalRepository + ?Sized,
    {
        let result = entry.validate(ctx, |code| chart.by_code(code).cloned())?;
        if !result.is_success() {
            return Ok(PostingOutcome::Rejected(result));
        }

        entry.confirm(entry.revision())?;
        entry.save(repository, entry.revision())?;

        let reports = LedgerAggregator::refresh_for_entry(
            entry,
            repository,
            range,
            |id| chart.by_id(id).cloned(),
            |id| chart.opening_balance(id),
        )?;
        info!(
            entry_id = %entry.header().id,
            number = entry.header().number,
            accounts = reports.len(),
            "journal entry posted"
        );
        Ok(PostingOutcome::Posted(reports))
    }
}
