//! Ledger error types for transaction construction and report generation.

use contable_shared::types::{AccountId, Currency, TransactionId};
use thiserror::Error;

use crate::amount::AmountError;
use crate::journal::repository::PersistenceError;

/// Errors building a transaction from a row.
///
/// Rows reach the factory only after validation, so these signal a caller
/// skipping that step rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// The row would not pass row validation.
    #[error("Row has not passed validation: {0}")]
    UnvalidatedRow(&'static str),

    /// The row names a different account than the one supplied.
    #[error("Row account code '{row_code}' does not match account '{account_code}'")]
    AccountMismatch {
        /// Code typed on the row.
        row_code: String,
        /// Code of the supplied account.
        account_code: String,
    },

    /// The account is kept in a different currency than the transaction.
    #[error("Account '{account_code}' is kept in {account_currency}, not {currency}")]
    CurrencyMismatch {
        /// Code of the supplied account.
        account_code: String,
        /// Currency the account is kept in.
        account_currency: Currency,
        /// Currency the transaction would be recorded in.
        currency: Currency,
    },

    /// The amount text could not be parsed.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl FactoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnvalidatedRow(_) => "UNVALIDATED_ROW",
            Self::AccountMismatch { .. } => "ACCOUNT_MISMATCH",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::Amount(e) => e.error_code(),
        }
    }
}

/// Errors that can occur during ledger report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A transaction in the input targets a different account.
    #[error("Transaction {transaction} does not belong to account {account}")]
    ForeignTransaction {
        /// The offending transaction.
        transaction: TransactionId,
        /// The account the report is for.
        account: AccountId,
    },

    /// A transaction in the input is recorded in another currency.
    #[error("Transaction {transaction} is in {currency}, account {account} is kept in {account_currency}")]
    CurrencyMismatch {
        /// The offending transaction.
        transaction: TransactionId,
        /// Currency of the transaction.
        currency: Currency,
        /// The account the report is for.
        account: AccountId,
        /// Currency the account is kept in.
        account_currency: Currency,
    },

    /// An affected account is missing from the reference data.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Loading history from the persistence collaborator failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ForeignTransaction { .. } => "FOREIGN_TRANSACTION",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_retryable())
    }
}
