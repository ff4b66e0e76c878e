//! Property-based tests for row and entry validation.
//!
//! Covers: debit/credit mutual exclusivity and the balance rule.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::row::EntryRow;
use super::validation::{JournalEntryValidator, RowValidator};
use crate::amount::AmountParser;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A row with both sides populated never passes.
    #[test]
    fn prop_both_sides_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
        index in 0usize..50,
    ) {
        let parser = AmountParser::default();
        let row = EntryRow {
            account_code: Some("1.1.01".into()),
            debit: Some(debit.to_string()),
            credit: Some(credit.to_string()),
            ..EntryRow::default()
        };

        let result = RowValidator::new(&parser).validate(index, &row);

        prop_assert!(!result.is_success());
        let expected = format!("Fila {}: no se puede tener débito y crédito simultáneamente", index + 1);
        prop_assert!(result.errors().contains(&expected));
    }

    /// A row with exactly one positive side and a code always passes.
    #[test]
    fn prop_single_side_accepted(amount in positive_amount(), is_debit in any::<bool>()) {
        let parser = AmountParser::default();
        let text = parser.format(amount);
        let row = if is_debit {
            EntryRow::debit("1.1.01", text)
        } else {
            EntryRow::credit("1.1.01", text)
        };

        prop_assert!(RowValidator::new(&parser).validate(0, &row).is_success());
    }

    /// Entries pass iff debits equal credits.
    #[test]
    fn prop_balance_rule(
        debits in prop::collection::vec(positive_amount(), 1..8),
        credits in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let parser = AmountParser::default();
        let rows: Vec<EntryRow> = debits
            .iter()
            .map(|a| EntryRow::debit("1.1.01", a.to_string()))
            .chain(credits.iter().map(|a| EntryRow::credit("4.1.01", a.to_string())))
            .collect();

        let outcome = JournalEntryValidator::new(&parser).validate(&rows);

        let debit: Decimal = debits.iter().sum();
        let credit: Decimal = credits.iter().sum();
        prop_assert_eq!(outcome.totals.debit, debit);
        prop_assert_eq!(outcome.totals.credit, credit);
        prop_assert_eq!(outcome.result.is_success(), debit == credit);
    }

    /// Mirroring every debit with an equal credit always balances.
    #[test]
    fn prop_mirrored_entry_balances(amounts in prop::collection::vec(positive_amount(), 1..10)) {
        let parser = AmountParser::default();
        let rows: Vec<EntryRow> = amounts
            .iter()
            .flat_map(|a| [EntryRow::debit("1.1.01", a.to_string()), EntryRow::credit("4.1.01", a.to_string())])
            .collect();

        let outcome = JournalEntryValidator::new(&parser).validate(&rows);

        prop_assert!(outcome.result.is_success(), "{:?}", outcome.result.errors());
        prop_assert!(outcome.totals.is_balanced);
    }
}
