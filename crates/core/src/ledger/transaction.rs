//! Ledger transactions: the immutable lines posted to an account.

use chrono::NaiveDate;
use contable_shared::types::{AccountId, JournalEntryId, LedgerId, Money, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::EntryType;
use crate::journal::row::AuxiliaryCodes;

/// A single debit or credit line against one account.
///
/// Built only by [`TransactionFactory`](super::factory::TransactionFactory);
/// fields are read through accessors so a constructed line cannot change.
/// The amount is strictly positive; direction lives in [`EntryType`].
/// Serialize-only: a line can be reported but never rebuilt from outside data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    entry_type: EntryType,
    amount: Money,
    date: NaiveDate,
    description: String,
    created_by: UserId,
    account_id: AccountId,
    account_code: String,
    journal_entry_id: JournalEntryId,
    ledger_id: LedgerId,
    codes: AuxiliaryCodes,
}

/// Field bundle for [`Transaction::new`].
pub(crate) struct TransactionParts {
    pub entry_type: EntryType,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
    pub created_by: UserId,
    pub account_id: AccountId,
    pub account_code: String,
    pub journal_entry_id: JournalEntryId,
    pub ledger_id: LedgerId,
    pub codes: AuxiliaryCodes,
}

impl Transaction {
    pub(crate) fn new(parts: TransactionParts) -> Self {
        Self {
            id: TransactionId::new(),
            entry_type: parts.entry_type,
            amount: parts.amount,
            date: parts.date,
            description: parts.description,
            created_by: parts.created_by,
            account_id: parts.account_id,
            account_code: parts.account_code,
            journal_entry_id: parts.journal_entry_id,
            ledger_id: parts.ledger_id,
            codes: parts.codes,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Debit or credit.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Positive, currency-tagged amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Date inherited from the owning entry.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Description inherited from the owning entry.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// User who created the line.
    #[must_use]
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Target account.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Code of the target account at the time of posting.
    #[must_use]
    pub fn account_code(&self) -> &str {
        &self.account_code
    }

    /// Owning journal entry.
    #[must_use]
    pub fn journal_entry_id(&self) -> JournalEntryId {
        self.journal_entry_id
    }

    /// Owning ledger, derived from the target account.
    #[must_use]
    pub fn ledger_id(&self) -> LedgerId {
        self.ledger_id
    }

    /// Auxiliary classification codes copied from the row.
    #[must_use]
    pub fn codes(&self) -> &AuxiliaryCodes {
        &self.codes
    }

    /// Debit amount, or zero for a credit line.
    #[must_use]
    pub fn debit(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount.amount,
            EntryType::Credit => Decimal::ZERO,
        }
    }

    /// Credit amount, or zero for a debit line.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => Decimal::ZERO,
            EntryType::Credit => self.amount.amount,
        }
    }
}

#[cfg(test)]
impl Transaction {
    /// A posted line against `account` outside any real entry.
    pub(crate) fn posted(
        account: &super::types::Account,
        entry_type: EntryType,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionParts {
            entry_type,
            amount: Money::new(amount, account.currency),
            date,
            description: format!("{entry_type} {amount}"),
            created_by: UserId::new(),
            account_id: account.id,
            account_code: account.code.clone(),
            journal_entry_id: JournalEntryId::new(),
            ledger_id: account.ledger_id,
            codes: AuxiliaryCodes::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::polarity::AccountNature;
    use crate::ledger::types::Account;
    use contable_shared::types::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_credit_split() {
        let account = Account::new("1.1.01", "Caja", AccountNature::Deudora, Currency::Bob);
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let debit = Transaction::posted(&account, EntryType::Debit, dec!(10.50), date);
        let credit = Transaction::posted(&account, EntryType::Credit, dec!(4), date);

        assert_eq!((debit.debit(), debit.credit()), (dec!(10.50), Decimal::ZERO));
        assert_eq!((credit.debit(), credit.credit()), (Decimal::ZERO, dec!(4)));
        assert_ne!(debit.id(), credit.id());
    }

    #[test]
    fn test_serializes_fields() {
        let account = Account::new("4.1.01", "Ventas", AccountNature::Acreedora, Currency::Usd);
        let tx = Transaction::posted(
            &account,
            EntryType::Credit,
            dec!(99.99),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );

        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["entry_type"], "credit");
        assert_eq!(json["account_code"], "4.1.01");
        assert_eq!(json["date"], "2026-01-31");
        assert_eq!(json["id"], tx.id().to_string());
    }
}
