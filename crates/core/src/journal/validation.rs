//! Row and entry validation for journal entries.
//!
//! Validation failures are data, not errors: every rule that fails adds a
//! user-facing message to a [`ValidationResult`] and checking carries on, so a
//! user sees every problem with an entry at once. Messages number rows from 1.

use rust_decimal::Decimal;
use serde::Serialize;

use super::row::EntryRow;
use crate::amount::AmountParser;
use crate::ledger::types::{EntryType, TransactionTotals};

/// Outcome of validating a row or an entry.
///
/// Either a success with no errors or a failure carrying at least one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    success: bool,
    errors: Vec<String>,
}

/// Result of a processing step; same shape as a validation outcome.
pub type ProcessingResult = ValidationResult;

impl ValidationResult {
    /// A successful result.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    /// Success iff `errors` is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
        }
    }

    /// A failure with a single message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::from_errors(vec![error.into()])
    }

    /// Returns true if no rule failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Messages in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the result, returning its messages.
    #[must_use]
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validates a single row in isolation.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    parser: &'a AmountParser,
}

impl<'a> RowValidator<'a> {
    /// Creates a validator reading amounts with `parser`.
    #[must_use]
    pub fn new(parser: &'a AmountParser) -> Self {
        Self { parser }
    }

    /// Checks row `index` (0-based) against the row rules.
    #[must_use]
    pub fn validate(&self, index: usize, row: &EntryRow) -> ValidationResult {
        let (errors, _) = self.check(index, row);
        ValidationResult::from_errors(errors)
    }

    /// Returns the row's messages and, when it passed, its side and amount.
    fn check(&self, index: usize, row: &EntryRow) -> (Vec<String>, Option<(EntryType, Decimal)>) {
        let n = index + 1;
        let mut errors = Vec::new();

        if row.trimmed_account_code().is_none() {
            errors.push(format!("Fila {n}: Código de cuenta es requerido"));
        }

        let has_debit = !self.parser.is_blank(row.debit.as_deref());
        let has_credit = !self.parser.is_blank(row.credit.as_deref());
        let side = match (has_debit, has_credit) {
            (true, true) => {
                errors.push(format!(
                    "Fila {n}: no se puede tener débito y crédito simultáneamente"
                ));
                None
            }
            (false, false) => {
                errors.push(format!("Fila {n}: se requiere débito o crédito"));
                None
            }
            (true, false) => Some((EntryType::Debit, row.debit.as_deref().unwrap_or_default())),
            (false, true) => Some((EntryType::Credit, row.credit.as_deref().unwrap_or_default())),
        };

        let parsed = side.and_then(|(entry_type, text)| match self.parser.parse(text) {
            Ok(amount) if amount > Decimal::ZERO => Some((entry_type, amount)),
            Ok(_) => {
                errors.push(format!("Fila {n}: el monto debe ser mayor a cero"));
                None
            }
            Err(_) => {
                errors.push(format!("Fila {n}: formato de monto inválido: '{text}'"));
                None
            }
        });

        if errors.is_empty() {
            (errors, parsed)
        } else {
            (errors, None)
        }
    }
}

/// Validation outcome of a whole entry together with its computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryValidation {
    /// All row and entry messages.
    pub result: ValidationResult,
    /// Sums over the rows that passed row validation.
    pub totals: TransactionTotals,
}

/// Validates every row of an entry and the double-entry balance.
#[derive(Debug, Clone, Copy)]
pub struct JournalEntryValidator<'a> {
    rows: RowValidator<'a>,
}

impl<'a> JournalEntryValidator<'a> {
    /// Creates a validator reading amounts with `parser`.
    #[must_use]
    pub fn new(parser: &'a AmountParser) -> Self {
        Self {
            rows: RowValidator::new(parser),
        }
    }

    /// Validates `rows`, collecting every row error, then checks that debits
    /// equal credits exactly.
    #[must_use]
    pub fn validate(&self, rows: &[EntryRow]) -> EntryValidation {
        if rows.is_empty() {
            return EntryValidation {
                result: ValidationResult::failure("El asiento debe tener al menos una fila"),
                totals: TransactionTotals::default(),
            };
        }

        let mut errors = Vec::new();
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;

        for (index, row) in rows.iter().enumerate() {
            let (row_errors, parsed) = self.rows.check(index, row);
            errors.extend(row_errors);
            match parsed {
                Some((EntryType::Debit, amount)) => debit += amount,
                Some((EntryType::Credit, amount)) => credit += amount,
                None => {}
            }
        }

        let totals = TransactionTotals::new(debit, credit);
        if !totals.is_balanced {
            errors.push("Total débitos y créditos no coinciden".to_string());
        }

        EntryValidation {
            result: ValidationResult::from_errors(errors),
            totals,
        }
    }
}
