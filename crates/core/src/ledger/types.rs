//! Ledger domain types.
//!
//! Accounts are reference data owned elsewhere; the engine only reads them.

use contable_shared::types::{AccountId, Currency, LedgerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::polarity::AccountNature;

/// Entry type: either Debit or Credit.
///
/// Direction is carried here, never by the sign of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit (débito / debe).
    Debit,
    /// Credit (crédito / haber).
    Credit,
}

impl EntryType {
    /// Returns the string representation of the entry type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ledger account (cuenta) from the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Chart-of-accounts code typed by users (e.g. "1.1.01").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Whether debits or credits increase the balance.
    pub nature: AccountNature,
    /// Currency the account is kept in.
    pub currency: Currency,
    /// The general ledger (libro mayor) that records this account's movements.
    pub ledger_id: LedgerId,
}

impl Account {
    /// Creates an account with fresh account and ledger IDs.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        nature: AccountNature,
        currency: Currency,
    ) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            nature,
            currency,
            ledger_id: LedgerId::new(),
        }
    }
}

/// Debit and credit totals of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits, exactly).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

impl Default for TransactionTotals {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }
}
