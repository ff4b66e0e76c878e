//! General ledger (libro mayor) reports derived from posted transactions.
//!
//! Reports are recomputed on demand and never stored. The running balance
//! starts from the opening balance and moves by
//! [`AccountNature::delta`](super::polarity::AccountNature::delta) for each
//! line, in date order.

use chrono::NaiveDate;
use contable_shared::types::{AccountId, DateRange, JournalEntryId};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ReportError;
use super::transaction::Transaction;
use super::types::Account;
use crate::journal::entry::JournalEntry;
use crate::journal::repository::JournalRepository;

/// One line of a ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReportEntry {
    /// Transaction date.
    pub date: NaiveDate,
    /// Description inherited from the journal entry.
    pub description: String,
    /// Journal entry the line came from.
    pub journal_entry_id: JournalEntryId,
    /// Debit amount, zero for credit lines.
    pub debit: Decimal,
    /// Credit amount, zero for debit lines.
    pub credit: Decimal,
    /// Balance after this line.
    pub balance: Decimal,
}

/// Ledger report for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibroMayorReport {
    /// The account reported on.
    pub account: Account,
    /// Balance before the first line.
    pub opening_balance: Decimal,
    /// Lines in date order.
    pub entries: Vec<LedgerReportEntry>,
    /// Sum of debit lines.
    pub total_debit: Decimal,
    /// Sum of credit lines.
    pub total_credit: Decimal,
    /// Balance after the last line.
    pub closing_balance: Decimal,
}

/// Inputs for one account's report.
#[derive(Debug, Clone, Copy)]
pub struct LedgerRequest<'a> {
    /// The account reported on.
    pub account: &'a Account,
    /// Balance before the first line.
    pub opening_balance: Decimal,
    /// Lines posted to the account, in any order.
    pub transactions: &'a [Transaction],
}

/// Builds ledger reports. Stateless; safe to call from any thread.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Builds the report for `account`.
    ///
    /// Lines are stably sorted by date, so same-day lines keep their input
    /// order. The same input always yields the same report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ForeignTransaction`] if a line targets another
    /// account and [`ReportError::CurrencyMismatch`] if a line is recorded in
    /// another currency than the account's.
    pub fn build_report(
        account: &Account,
        opening_balance: Decimal,
        transactions: &[Transaction],
    ) -> Result<LibroMayorReport, ReportError> {
        let ordered = Self::ordered(account, transactions)?;

        let mut balance = opening_balance;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let entries = ordered
            .into_iter()
            .map(|tx| {
                balance += account.nature.delta(tx.entry_type(), tx.amount().amount);
                total_debit += tx.debit();
                total_credit += tx.credit();
                LedgerReportEntry {
                    date: tx.date(),
                    description: tx.description().to_string(),
                    journal_entry_id: tx.journal_entry_id(),
                    debit: tx.debit(),
                    credit: tx.credit(),
                    balance,
                }
            })
            .collect();

        Ok(LibroMayorReport {
            account: account.clone(),
            opening_balance,
            entries,
            total_debit,
            total_credit,
            closing_balance: balance,
        })
    }

    /// Closing balance of `account` without building report lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_report`].
    pub fn closing_balance(
        account: &Account,
        opening_balance: Decimal,
        transactions: &[Transaction],
    ) -> Result<Decimal, ReportError> {
        transactions.iter().try_fold(opening_balance, |balance, tx| {
            Self::check_owner(account, tx)?;
            Ok(balance + account.nature.delta(tx.entry_type(), tx.amount().amount))
        })
    }

    /// Builds many reports in parallel, in request order.
    ///
    /// # Errors
    ///
    /// Returns the first error of any request.
    pub fn build_reports(requests: &[LedgerRequest<'_>]) -> Result<Vec<LibroMayorReport>, ReportError> {
        requests
            .par_iter()
            .map(|req| Self::build_report(req.account, req.opening_balance, req.transactions))
            .collect()
    }

    /// Rebuilds the reports of every account a saved entry touched.
    ///
    /// History is loaded through `repository` for `range`; accounts come from
    /// `account_by_id` and their opening balances from `opening_for`. Reports
    /// follow the order in which accounts first appear in the entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AccountNotFound`] for an unknown account and
    /// [`ReportError::Persistence`] if loading fails.
    pub fn refresh_for_entry<R, A, O>(
        entry: &JournalEntry,
        repository: &R,
        range: DateRange,
        account_by_id: A,
        opening_for: O,
    ) -> Result<Vec<LibroMayorReport>, ReportError>
    where
        R: JournalRepository + ?Sized,
        A: Fn(AccountId) -> Option<Account>,
        O: Fn(AccountId) -> Decimal,
    {
        let mut affected: Vec<AccountId> = Vec::new();
        for tx in entry.transactions() {
            if !affected.contains(&tx.account_id()) {
                affected.push(tx.account_id());
            }
        }

        let mut loaded = Vec::with_capacity(affected.len());
        for id in affected {
            let account = account_by_id(id).ok_or(ReportError::AccountNotFound(id))?;
            let history = repository.load(id, range)?;
            loaded.push((account, opening_for(id), history));
        }

        let requests: Vec<LedgerRequest<'_>> = loaded
            .iter()
            .map(|(account, opening_balance, history)| LedgerRequest {
                account,
                opening_balance: *opening_balance,
                transactions: history,
            })
            .collect();

        let reports = Self::build_reports(&requests)?;
        debug!(
            entry_id = %entry.header().id,
            accounts = reports.len(),
            "ledger reports refreshed"
        );
        Ok(reports)
    }

    fn ordered<'t>(
        account: &Account,
        transactions: &'t [Transaction],
    ) -> Result<Vec<&'t Transaction>, ReportError> {
        let mut ordered = Vec::with_capacity(transactions.len());
        for tx in transactions {
            Self::check_owner(account, tx)?;
            ordered.push(tx);
        }
        ordered.sort_by_key(|tx| tx.date());
        Ok(ordered)
    }

    fn check_owner(account: &Account, tx: &Transaction) -> Result<(), ReportError> {
        if tx.account_id() != account.id {
            return Err(ReportError::ForeignTransaction {
                transaction: tx.id(),
                account: account.id,
            });
        }
        if tx.amount().currency != account.currency {
            return Err(ReportError::CurrencyMismatch {
                transaction: tx.id(),
                currency: tx.amount().currency,
                account: account.id,
                account_currency: account.currency,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::polarity::AccountNature;
    use crate::ledger::types::EntryType;
    use contable_shared::types::Currency;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn caja() -> Account {
        Account::new("1.1.01", "Caja", AccountNature::Deudora, Currency::Bob)
    }

    fn ventas() -> Account {
        Account::new("4.1.01", "Ventas", AccountNature::Acreedora, Currency::Bob)
    }

    #[test]
    fn test_running_balance_deudora() {
        let account = caja();
        let txs = [
            Transaction::posted(&account, EntryType::Debit, dec!(1000), date(2)),
            Transaction::posted(&account, EntryType::Credit, dec!(250.50), date(5)),
            Transaction::posted(&account, EntryType::Debit, dec!(100), date(9)),
        ];

        let report = LedgerAggregator::build_report(&account, dec!(500), &txs).unwrap();

        let balances: Vec<_> = report.entries.iter().map(|e| e.balance).collect();
        assert_eq!(balances, vec![dec!(1500), dec!(1249.50), dec!(1349.50)]);
        assert_eq!(report.opening_balance, dec!(500));
        assert_eq!(report.closing_balance, dec!(1349.50));
        assert_eq!(report.total_debit, dec!(1100));
        assert_eq!(report.total_credit, dec!(250.50));
    }

    #[test]
    fn test_running_balance_acreedora() {
        let account = ventas();
        let txs = [
            Transaction::posted(&account, EntryType::Credit, dec!(300), date(1)),
            Transaction::posted(&account, EntryType::Debit, dec!(50), date(2)),
        ];

        let report = LedgerAggregator::build_report(&account, Decimal::ZERO, &txs).unwrap();

        assert_eq!(report.entries[0].balance, dec!(300));
        assert_eq!(report.entries[1].balance, dec!(250));
        assert_eq!(report.entries[1].debit, dec!(50));
        assert_eq!(report.entries[1].credit, Decimal::ZERO);
    }

    #[test]
    fn test_sorted_by_date_stable_within_day() {
        let account = caja();
        let late = Transaction::posted(&account, EntryType::Debit, dec!(1), date(20));
        let first = Transaction::posted(&account, EntryType::Debit, dec!(2), date(3));
        let second = Transaction::posted(&account, EntryType::Debit, dec!(3), date(3));

        let report =
            LedgerAggregator::build_report(&account, Decimal::ZERO, &[late, first, second]).unwrap();

        let debits: Vec<_> = report.entries.iter().map(|e| e.debit).collect();
        assert_eq!(debits, vec![dec!(2), dec!(3), dec!(1)]);
    }

    #[test]
    fn test_empty_report() {
        let report = LedgerAggregator::build_report(&caja(), dec!(42), &[]).unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.closing_balance, dec!(42));
    }

    #[test]
    fn test_foreign_transaction_rejected() {
        let account = caja();
        let other = ventas();
        let tx = Transaction::posted(&other, EntryType::Credit, dec!(1), date(1));

        let err = LedgerAggregator::build_report(&account, Decimal::ZERO, std::slice::from_ref(&tx))
            .unwrap_err();

        assert_eq!(
            err,
            ReportError::ForeignTransaction {
                transaction: tx.id(),
                account: account.id,
            }
        );
        assert!(LedgerAggregator::closing_balance(&account, Decimal::ZERO, &[tx]).is_err());
    }

    #[test]
    fn test_transaction_in_other_currency_rejected() {
        let bob = caja();
        let usd = Account {
            currency: Currency::Usd,
            ..bob.clone()
        };
        let tx = Transaction::posted(&bob, EntryType::Debit, dec!(700), date(1));

        let err = LedgerAggregator::build_report(&usd, dec!(100), std::slice::from_ref(&tx))
            .unwrap_err();

        assert_eq!(
            err,
            ReportError::CurrencyMismatch {
                transaction: tx.id(),
                currency: Currency::Bob,
                account: usd.id,
                account_currency: Currency::Usd,
            }
        );
        assert_eq!(err.error_code(), "CURRENCY_MISMATCH");
        assert!(LedgerAggregator::closing_balance(&usd, dec!(100), &[tx]).is_err());
    }

    #[test]
    fn test_build_reports_keeps_request_order() {
        let caja = caja();
        let ventas = ventas();
        let caja_txs = [Transaction::posted(&caja, EntryType::Debit, dec!(10), date(1))];
        let ventas_txs = [Transaction::posted(&ventas, EntryType::Credit, dec!(10), date(1))];

        let reports = LedgerAggregator::build_reports(&[
            LedgerRequest {
                account: &ventas,
                opening_balance: Decimal::ZERO,
                transactions: &ventas_txs,
            },
            LedgerRequest {
                account: &caja,
                opening_balance: dec!(5),
                transactions: &caja_txs,
            },
        ])
        .unwrap();

        assert_eq!(reports[0].account.id, ventas.id);
        assert_eq!(reports[0].closing_balance, dec!(10));
        assert_eq!(reports[1].account.id, caja.id);
        assert_eq!(reports[1].closing_balance, dec!(15));
    }
}
