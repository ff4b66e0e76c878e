//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// How monetary text is written by users.
    #[serde(default)]
    pub amounts: AmountConfig,
    /// Ledger defaults.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locale conventions for amounts typed into journal rows.
#[derive(Debug, Clone, Deserialize)]
pub struct AmountConfig {
    /// Currency symbols stripped before parsing.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Thousands grouping character.
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: char,
    /// Decimal point character.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_symbols() -> Vec<String> {
    vec!["$".into(), "Bs".into(), "S/".into(), "€".into()]
}

fn default_grouping_separator() -> char {
    ','
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for AmountConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            grouping_separator: default_grouping_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

/// Ledger defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// Currency used when an entry does not name one.
    #[serde(default)]
    pub default_currency: Currency,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "contable=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and `CONTABLE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CONTABLE")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("amounts.symbols")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
