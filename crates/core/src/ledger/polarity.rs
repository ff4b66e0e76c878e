//! Account polarity: how a debit or credit moves an account's balance.
//!
//! This is the only place balance-sign logic lives. Everything that needs a
//! signed movement calls [`AccountNature::delta`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::EntryType;

/// The nature (naturaleza) of an account.
///
/// - `Deudora`: debits increase the balance (assets, expenses)
/// - `Acreedora`: credits increase the balance (liabilities, equity, revenue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountNature {
    /// Debit-increasing account.
    Deudora,
    /// Credit-increasing account.
    Acreedora,
}

impl AccountNature {
    /// Signed balance movement for a line of `entry_type` and positive `amount`.
    ///
    /// | nature    | debit     | credit    |
    /// |-----------|-----------|-----------|
    /// | DEUDORA   | `+amount` | `-amount` |
    /// | ACREEDORA | `-amount` | `+amount` |
    #[must_use]
    pub fn delta(self, entry_type: EntryType, amount: Decimal) -> Decimal {
        match (self, entry_type) {
            (Self::Deudora, EntryType::Debit) | (Self::Acreedora, EntryType::Credit) => amount,
            (Self::Deudora, EntryType::Credit) | (Self::Acreedora, EntryType::Debit) => -amount,
        }
    }

    /// Returns the string representation used in the chart of accounts.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deudora => "DEUDORA",
            Self::Acreedora => "ACREEDORA",
        }
    }

    /// Parses a nature from its chart-of-accounts name, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEUDORA" => Some(Self::Deudora),
            "ACREEDORA" => Some(Self::Acreedora),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
