//! Double-entry bookkeeping logic.
//!
//! This module implements the ledger side of posting:
//! - Accounts, their nature and the chart they live in
//! - Immutable transactions and the factory that builds them from rows
//! - General ledger (libro mayor) reports with running balances
//! - Error types for transaction construction and reporting

pub mod aggregator;
pub mod chart;
pub mod error;
pub mod factory;
pub mod polarity;
pub mod transaction;
pub mod types;

#[cfg(test)]
mod aggregator_props;

pub use aggregator::{LedgerAggregator, LedgerReportEntry, LedgerRequest, LibroMayorReport};
pub use chart::ChartOfAccounts;
pub use error::{FactoryError, ReportError};
pub use factory::TransactionFactory;
pub use polarity::AccountNature;
pub use transaction::Transaction;
pub use types::{Account, EntryType, TransactionTotals};
