//! Property-based tests for ledger report aggregation.
//!
//! Covers: polarity of running balances, determinism, and that the closing
//! balance is the opening balance plus the signed sum of all lines.

use chrono::NaiveDate;
use contable_shared::types::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::LedgerAggregator;
use super::polarity::AccountNature;
use super::transaction::Transaction;
use super::types::{Account, EntryType};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an opening balance, possibly negative.
fn opening_balance() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn nature_strategy() -> impl Strategy<Value = AccountNature> {
    prop_oneof![Just(AccountNature::Deudora), Just(AccountNature::Acreedora)]
}

/// Lines as (type, amount, day of March).
fn lines() -> impl Strategy<Value = Vec<(EntryType, Decimal, u32)>> {
    prop::collection::vec((entry_type_strategy(), positive_amount(), 1u32..=31), 0..25)
}

fn post(account: &Account, lines: &[(EntryType, Decimal, u32)]) -> Vec<Transaction> {
    lines
        .iter()
        .map(|(entry_type, amount, day)| {
            let date = NaiveDate::from_ymd_opt(2026, 3, *day).unwrap();
            Transaction::posted(account, *entry_type, *amount, date)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same input, same report.
    #[test]
    fn prop_report_is_deterministic(
        nature in nature_strategy(),
        opening in opening_balance(),
        lines in lines(),
    ) {
        let account = Account::new("1.1.01", "Caja", nature, Currency::Bob);
        let txs = post(&account, &lines);

        let first = LedgerAggregator::build_report(&account, opening, &txs).unwrap();
        let second = LedgerAggregator::build_report(&account, opening, &txs).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Closing balance equals opening plus the polarity-signed sum.
    #[test]
    fn prop_closing_balance_follows_polarity(
        nature in nature_strategy(),
        opening in opening_balance(),
        lines in lines(),
    ) {
        let account = Account::new("1.1.01", "Caja", nature, Currency::Bob);
        let txs = post(&account, &lines);

        let expected = lines.iter().fold(opening, |acc, (entry_type, amount, _)| {
            let signed = match (nature, entry_type) {
                (AccountNature::Deudora, EntryType::Debit)
                | (AccountNature::Acreedora, EntryType::Credit) => *amount,
                _ => -*amount,
            };
            acc + signed
        });

        let report = LedgerAggregator::build_report(&account, opening, &txs).unwrap();
        prop_assert_eq!(report.closing_balance, expected);
        prop_assert_eq!(
            LedgerAggregator::closing_balance(&account, opening, &txs).unwrap(),
            expected
        );
    }

    /// Every line's balance is the previous balance moved by that line.
    #[test]
    fn prop_running_balance_steps(
        nature in nature_strategy(),
        opening in opening_balance(),
        lines in lines(),
    ) {
        let account = Account::new("2.1.01", "Proveedores", nature, Currency::Bob);
        let txs = post(&account, &lines);

        let report = LedgerAggregator::build_report(&account, opening, &txs).unwrap();

        let mut previous = opening;
        let mut previous_date = None;
        for line in &report.entries {
            let entry_type = if line.debit > Decimal::ZERO { EntryType::Debit } else { EntryType::Credit };
            let amount = line.debit + line.credit;
            prop_assert_eq!(line.balance, previous + nature.delta(entry_type, amount));
            prop_assert!(previous_date.is_none_or(|d| d <= line.date));
            previous = line.balance;
            previous_date = Some(line.date);
        }
        prop_assert_eq!(report.entries.len(), lines.len());
    }

    /// Totals add up to the debit and credit lines.
    #[test]
    fn prop_totals_match_lines(lines in lines()) {
        let account = Account::new("1.1.01", "Caja", AccountNature::Deudora, Currency::Bob);
        let txs = post(&account, &lines);

        let report = LedgerAggregator::build_report(&account, Decimal::ZERO, &txs).unwrap();

        let debit: Decimal = lines.iter().filter(|l| l.0 == EntryType::Debit).map(|l| l.1).sum();
        let credit: Decimal = lines.iter().filter(|l| l.0 == EntryType::Credit).map(|l| l.1).sum();
        prop_assert_eq!(report.total_debit, debit);
        prop_assert_eq!(report.total_credit, credit);
    }
}
