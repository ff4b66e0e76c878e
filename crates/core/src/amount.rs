//! Parsing and formatting of locale-formatted monetary text.
//!
//! Amounts arrive from journal rows as raw text such as `"$1,000.00"` or
//! `"Bs 250.50"`. Parsing strips the currency symbol and grouping characters
//! and reads the rest as an exact `Decimal`; precision is never altered.

use contable_shared::config::AmountConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised while reading monetary text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The text is not a decimal literal once symbols and separators are removed.
    #[error("Invalid amount format: '{0}'")]
    InvalidAmountFormat(String),
}

impl AmountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmountFormat(_) => "INVALID_AMOUNT_FORMAT",
        }
    }
}

/// Locale conventions for writing amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    symbols: Vec<String>,
    grouping_separator: char,
    decimal_separator: char,
}

impl AmountFormat {
    /// Creates a format. Longer symbols are stripped first so `"US$"` wins over `"$"`.
    #[must_use]
    pub fn new(symbols: Vec<String>, grouping_separator: char, decimal_separator: char) -> Self {
        let mut symbols: Vec<String> = symbols.into_iter().filter(|s| !s.is_empty()).collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            symbols,
            grouping_separator,
            decimal_separator,
        }
    }

    /// Thousands grouping character.
    #[must_use]
    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    /// Decimal point character.
    #[must_use]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::from(&AmountConfig::default())
    }
}

impl From<&AmountConfig> for AmountFormat {
    fn from(config: &AmountConfig) -> Self {
        Self::new(
            config.symbols.clone(),
            config.grouping_separator,
            config.decimal_separator,
        )
    }
}

/// Reads and writes amounts in a given [`AmountFormat`].
///
/// Holds no per-call state, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct AmountParser {
    format: AmountFormat,
}

impl AmountParser {
    /// Creates a parser for the given format.
    #[must_use]
    pub fn new(format: AmountFormat) -> Self {
        Self { format }
    }

    /// The format this parser reads.
    #[must_use]
    pub fn format_rules(&self) -> &AmountFormat {
        &self.format
    }

    /// Parses `text` into an exact decimal.
    ///
    /// `"$1,000.00"` yields `1000.00` with its scale of 2 intact.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::InvalidAmountFormat`] when the cleaned text is
    /// empty or not a decimal literal.
    pub fn parse(&self, text: &str) -> Result<Decimal, AmountError> {
        let cleaned = self.clean(text);
        let is_literal = !cleaned.is_empty()
            && cleaned
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
        if !is_literal {
            return Err(AmountError::InvalidAmountFormat(text.to_string()));
        }
        Decimal::from_str_exact(&cleaned)
            .map_err(|_| AmountError::InvalidAmountFormat(text.to_string()))
    }

    /// Returns true if the field holds nothing but symbols and whitespace.
    #[must_use]
    pub fn is_blank(&self, text: Option<&str>) -> bool {
        text.is_none_or(|t| self.clean(t).is_empty())
    }

    /// Renders `amount` with grouping and two decimals, e.g. `1,000.00`.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.format.grouping_separator);
            }
            grouped.push(digit);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{grouped}{}{cents}", self.format.decimal_separator)
    }

    fn clean(&self, text: &str) -> String {
        let mut stripped = text.trim().to_string();
        for symbol in &self.format.symbols {
            stripped = stripped.replace(symbol.as_str(), "");
        }
        stripped
            .chars()
            .filter(|c| !c.is_whitespace() && *c != self.format.grouping_separator)
            .map(|c| if c == self.format.decimal_separator { '.' } else { c })
            .collect()
    }
}
