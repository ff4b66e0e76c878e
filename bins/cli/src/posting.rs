//! Posting of journal entries described in a JSON file.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use contable_core::AmountParser;
use contable_core::NumberToWords;
use contable_core::fiscal::{FiscalPeriod, PeriodStatus};
use contable_core::journal::{
    EntryState, InMemoryJournalRepository, JournalEntry, NewJournalEntry, PostingContext,
    PostingOutcome, PostingService,
};
use contable_core::ledger::{Account, AccountNature, ChartOfAccounts};
use contable_shared::types::{Currency, DateRange, OrganizationId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Contents of a posting file.
#[derive(Debug, Deserialize)]
pub struct PostingFile {
    /// Fiscal period every entry is dated in.
    pub period: PeriodInput,
    /// Currency of the transactions; the configured default when absent.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Chart of accounts with opening balances.
    pub accounts: Vec<AccountInput>,
    /// Entries to post, in order.
    pub entries: Vec<NewJournalEntry>,
}

/// A fiscal period as written in a posting file.
#[derive(Debug, Deserialize)]
pub struct PeriodInput {
    /// Period name.
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Open unless stated.
    #[serde(default)]
    pub status: PeriodStatus,
}

/// An account as written in a posting file.
#[derive(Debug, Deserialize)]
pub struct AccountInput {
    /// Chart-of-accounts code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// DEUDORA or ACREEDORA.
    pub nature: AccountNature,
    /// Account currency; the file currency when absent.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Balance at the start of the period.
    #[serde(default)]
    pub opening_balance: Decimal,
}

/// What happened to one entry.
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    /// Entry number.
    pub number: u32,
    /// State the entry ended in.
    pub state: EntryState,
    /// Total debits (equal to total credits when posted).
    pub total: Decimal,
    /// Total in words, for posted entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_in_words: Option<String>,
    /// Why the total could not be written in words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_error: Option<String>,
    /// Validation errors or refreshed ledgers.
    pub outcome: PostingOutcome,
}

/// Posts every entry of `file` in order against a fresh in-memory journal.
///
/// # Errors
///
/// Fails on a malformed period, an entry dated outside the period or in a
/// closed one, or a posting error. Validation failures and totals too large
/// to write in words are not errors; they are reported in the entry's summary.
pub fn post_file(file: PostingFile, parser: &AmountParser, default_currency: Currency) -> Result<Vec<EntrySummary>> {
    let currency = file.currency.unwrap_or(default_currency);
    let period = FiscalPeriod {
        status: file.period.status,
        ..FiscalPeriod::open(
            OrganizationId::new(),
            file.period.name,
            file.period.start_date,
            file.period.end_date,
        )
    };
    let range = DateRange::new(period.start_date, period.end_date).context("invalid period")?;

    let chart: ChartOfAccounts = file
        .accounts
        .into_iter()
        .map(|input| {
            let account = Account::new(
                input.code,
                input.name,
                input.nature,
                input.currency.unwrap_or(currency),
            );
            (account, input.opening_balance)
        })
        .collect();
    info!(accounts = chart.len(), period = %period.name, "chart of accounts loaded");

    let repository = InMemoryJournalRepository::new();
    let ctx = PostingContext {
        parser,
        currency,
        user: UserId::new(),
    };

    let mut summaries = Vec::with_capacity(file.entries.len());
    for input in file.entries {
        let number = input.number;
        let mut entry = JournalEntry::open(input, &period)
            .with_context(|| format!("cannot open entry {number}"))?;
        let outcome = PostingService::post(&mut entry, &ctx, &repository, &chart, range)
            .with_context(|| format!("cannot post entry {number}"))?;

        let total = entry.totals().debit;
        let (total_in_words, words_error) = match &outcome {
            PostingOutcome::Posted(_) => match NumberToWords::convert(total) {
                Ok(words) => (Some(words), None),
                Err(e) => {
                    warn!(number, error = %e, "total cannot be written in words");
                    (None, Some(e.to_string()))
                }
            },
            PostingOutcome::Rejected(result) => {
                warn!(number, errors = ?result.errors(), "entry rejected");
                (None, None)
            }
        };

        summaries.push(EntrySummary {
            number,
            state: entry.state(),
            total,
            total_in_words,
            words_error,
            outcome,
        });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FILE: &str = r#"{
        "period": { "name": "Marzo 2026", "start_date": "2026-03-01", "end_date": "2026-03-31" },
        "accounts": [
            { "code": "1.1.01", "name": "Caja", "nature": "DEUDORA", "opening_balance": "500" },
            { "code": "4.1.01", "name": "Ventas", "nature": "ACREEDORA" }
        ],
        "entries": [
            {
                "number": 1,
                "description": "Venta al contado",
                "date": "2026-03-14",
                "rows": [
                    { "account_code": "1.1.01", "debit": "$10,520.93" },
                    { "account_code": "4.1.01", "credit": "10,520.93", "third_party": "C-001" }
                ]
            },
            {
                "number": 2,
                "description": "Descuadrado",
                "date": "2026-03-15",
                "rows": [
                    { "account_code": "1.1.01", "debit": "10" },
                    { "account_code": "4.1.01", "credit": "9" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_post_file() {
        let file: PostingFile = serde_json::from_str(FILE).unwrap();

        let summaries = post_file(file, &AmountParser::default(), Currency::Bob).unwrap();

        assert_eq!(summaries.len(), 2);
        let posted = &summaries[0];
        assert_eq!(posted.state, EntryState::Saved);
        assert_eq!(posted.total, dec!(10520.93));
        assert_eq!(
            posted.total_in_words.as_deref(),
            Some("DIEZ MIL QUINIENTOS VEINTE CON 93/100")
        );
        let PostingOutcome::Posted(reports) = &posted.outcome else {
            panic!("first entry should post");
        };
        assert_eq!(reports[0].closing_balance, dec!(11020.93));

        let rejected = &summaries[1];
        assert_eq!(rejected.state, EntryState::Rejected);
        assert!(rejected.total_in_words.is_none());
    }

    #[test]
    fn test_total_too_large_for_words_keeps_run_going() {
        let mut file: PostingFile = serde_json::from_str(FILE).unwrap();
        for row in &mut file.entries[0].rows {
            for side in [&mut row.debit, &mut row.credit].into_iter().flatten() {
                *side = "1,000,000,000,000.00".to_string();
            }
        }

        let summaries = post_file(file, &AmountParser::default(), Currency::Bob).unwrap();

        assert_eq!(summaries.len(), 2);
        let posted = &summaries[0];
        assert_eq!(posted.state, EntryState::Saved);
        assert!(posted.total_in_words.is_none());
        assert!(posted.words_error.as_deref().unwrap().contains("out of the supported range"));
        assert_eq!(summaries[1].state, EntryState::Rejected);
    }

    #[test]
    fn test_account_in_other_currency_is_rejected() {
        let mut file: PostingFile = serde_json::from_str(FILE).unwrap();
        file.accounts[0].currency = Some(Currency::Usd);

        let summaries = post_file(file, &AmountParser::default(), Currency::Bob).unwrap();

        assert_eq!(summaries[0].state, EntryState::Rejected);
        let PostingOutcome::Rejected(result) = &summaries[0].outcome else {
            panic!("first entry should be rejected");
        };
        assert_eq!(
            result.errors(),
            ["Fila 1: la cuenta '1.1.01' está en USD, no en BOB".to_string()]
        );
    }

    #[test]
    fn test_entry_outside_period_fails() {
        let mut file: PostingFile = serde_json::from_str(FILE).unwrap();
        file.entries[0].date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        let err = post_file(file, &AmountParser::default(), Currency::Bob).unwrap_err();

        assert!(err.to_string().contains("cannot open entry 1"));
    }
}
