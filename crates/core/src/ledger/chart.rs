//! In-memory chart of accounts with opening balances.
//!
//! Read-only reference data handed to posting; lookups by code serve row
//! validation, lookups by id serve ledger refreshes.

use std::collections::HashMap;

use contable_shared::types::AccountId;
use rust_decimal::Decimal;

use super::types::Account;

/// Accounts keyed by id and code, each with the balance it opens the period with.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountId, (Account, Decimal)>,
    by_code: HashMap<String, AccountId>,
}

impl ChartOfAccounts {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account. A later account with the same code wins.
    pub fn insert(&mut self, account: Account, opening_balance: Decimal) {
        if let Some((previous, _)) = self.accounts.remove(&account.id) {
            self.by_code.remove(&previous.code);
        }
        if let Some(shadowed) = self.by_code.insert(account.code.clone(), account.id) {
            self.accounts.remove(&shadowed);
        }
        self.accounts.insert(account.id, (account, opening_balance));
    }

    /// Finds an account by its chart-of-accounts code (surrounding whitespace ignored).
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Account> {
        self.by_code
            .get(code.trim())
            .and_then(|id| self.accounts.get(id))
            .map(|(account, _)| account)
    }

    /// Finds an account by id.
    #[must_use]
    pub fn by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id).map(|(account, _)| account)
    }

    /// Opening balance of an account; zero when the account is unknown.
    #[must_use]
    pub fn opening_balance(&self, id: AccountId) -> Decimal {
        self.accounts
            .get(&id)
            .map_or(Decimal::ZERO, |(_, opening)| *opening)
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<(Account, Decimal)> for ChartOfAccounts {
    fn from_iter<I: IntoIterator<Item = (Account, Decimal)>>(iter: I) -> Self {
        let mut chart = Self::new();
        for (account, opening) in iter {
            chart.insert(account, opening);
        }
        chart
    }
}
