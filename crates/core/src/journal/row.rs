//! Proposed journal lines as typed by a user.

use serde::{Deserialize, Serialize};

/// Optional classification codes carried from a row onto its transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryCodes {
    /// Sub-account (subcuenta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<String>,
    /// Third party (tercero).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party: Option<String>,
    /// Analysis / cost-center code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    /// Financial statement epigraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epigraph: Option<String>,
}

/// One proposed line of a journal entry.
///
/// Amounts stay as raw locale-formatted text until validation parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    /// Chart-of-accounts code of the target account.
    #[serde(default)]
    pub account_code: Option<String>,
    /// Auxiliary classification codes.
    #[serde(default, flatten)]
    pub codes: AuxiliaryCodes,
    /// Debit amount text (e.g. "$1,000.00"); blank when the line is a credit.
    #[serde(default)]
    pub debit: Option<String>,
    /// Credit amount text; blank when the line is a debit.
    #[serde(default)]
    pub credit: Option<String>,
}

impl EntryRow {
    /// A debit line against `account_code`.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            account_code: Some(account_code.into()),
            debit: Some(amount.into()),
            ..Self::default()
        }
    }

    /// A credit line against `account_code`.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            account_code: Some(account_code.into()),
            credit: Some(amount.into()),
            ..Self::default()
        }
    }

    /// Attaches auxiliary codes.
    #[must_use]
    pub fn with_codes(mut self, codes: AuxiliaryCodes) -> Self {
        self.codes = codes;
        self
    }

    /// The account code with surrounding whitespace removed, if any is present.
    #[must_use]
    pub fn trimmed_account_code(&self) -> Option<&str> {
        self.account_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}
