//! Materialises validated rows into ledger transactions.

use contable_shared::types::{Currency, Money, UserId};
use rust_decimal::Decimal;

use super::error::FactoryError;
use super::transaction::{Transaction, TransactionParts};
use super::types::{Account, EntryType};
use crate::amount::AmountParser;
use crate::journal::entry::EntryHeader;
use crate::journal::row::EntryRow;

/// Builds immutable [`Transaction`]s from rows that passed row validation.
///
/// Creation has no effect on account balances; those are derived later by
/// the ledger aggregator.
#[derive(Debug, Clone, Copy)]
pub struct TransactionFactory<'a> {
    parser: &'a AmountParser,
}

impl<'a> TransactionFactory<'a> {
    /// Creates a factory reading amounts with `parser`.
    #[must_use]
    pub fn new(parser: &'a AmountParser) -> Self {
        Self { parser }
    }

    /// Turns `row` into a transaction against `account`, owned by `entry`.
    ///
    /// The type comes from whichever of debit/credit is populated, the date and
    /// description from the entry, and the ledger from the account.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::CurrencyMismatch`] if `account` is kept in a
    /// currency other than `currency`, and [`FactoryError::UnvalidatedRow`]
    /// for a row that would not pass row validation.
    pub fn create(
        &self,
        row: &EntryRow,
        account: &Account,
        entry: &EntryHeader,
        currency: Currency,
        acting_user: UserId,
    ) -> Result<Transaction, FactoryError> {
        let row_code = row
            .trimmed_account_code()
            .ok_or(FactoryError::UnvalidatedRow("account code is required"))?;
        if row_code != account.code.trim() {
            return Err(FactoryError::AccountMismatch {
                row_code: row_code.to_string(),
                account_code: account.code.clone(),
            });
        }
        if account.currency != currency {
            return Err(FactoryError::CurrencyMismatch {
                account_code: account.code.clone(),
                account_currency: account.currency,
                currency,
            });
        }

        let (entry_type, text) = self.populated_side(row)?;
        let amount = self.parser.parse(text)?;
        if amount <= Decimal::ZERO {
            return Err(FactoryError::UnvalidatedRow("amount must be greater than zero"));
        }

        Ok(Transaction::new(TransactionParts {
            entry_type,
            amount: Money::new(amount, currency),
            date: entry.date,
            description: entry.description.clone(),
            created_by: acting_user,
            account_id: account.id,
            account_code: account.code.clone(),
            journal_entry_id: entry.id,
            ledger_id: account.ledger_id,
            codes: row.codes.clone(),
        }))
    }

    fn populated_side<'r>(&self, row: &'r EntryRow) -> Result<(EntryType, &'r str), FactoryError> {
        let debit = row.debit.as_deref().filter(|t| !self.parser.is_blank(Some(t)));
        let credit = row.credit.as_deref().filter(|t| !self.parser.is_blank(Some(t)));
        match (debit, credit) {
            (Some(text), None) => Ok((EntryType::Debit, text)),
            (None, Some(text)) => Ok((EntryType::Credit, text)),
            (Some(_), Some(_)) => Err(FactoryError::UnvalidatedRow(
                "debit and credit are both populated",
            )),
            (None, None) => Err(FactoryError::UnvalidatedRow(
                "neither debit nor credit is populated",
            )),
        }
    }
}
