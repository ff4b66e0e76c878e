//! Core journal-entry engine for Contable.
//!
//! This crate contains pure business logic with ZERO storage or UI dependencies.
//! Persistence is reached only through the `JournalRepository` trait.
//!
//! # Modules
//!
//! - `amount` - Parsing and formatting of locale-formatted amounts
//! - `words` - Amounts in Spanish words for financial documents
//! - `fiscal` - Fiscal periods
//! - `journal` - Journal entries, validation and their lifecycle
//! - `ledger` - Accounts, transactions and general ledger reports

pub mod amount;
pub mod fiscal;
pub mod journal;
pub mod ledger;
pub mod words;

pub use amount::{AmountError, AmountFormat, AmountParser};
pub use words::{NumberToWords, WordsError};
