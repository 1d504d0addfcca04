//! Layered desk configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults (`Default` impls below).
//! 2. `<config-dir>/desk.toml`, if it exists.
//! 3. Environment variables prefixed `AURA__`, sections separated by `__`
//!    (e.g. `AURA__FEED__POLL_INTERVAL_MS=5000`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_CAPACITY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_anchor() -> DateTime<Utc> {
    // 2026-02-10T00:00:00Z
    DateTime::from_timestamp(1_770_681_600, 0).unwrap_or_default()
}

/// Quote polling and history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    quote_url: String,
    /// Suffix stripped from exchange symbols to get the asset symbol.
    quote_currency: String,
    poll_interval_ms: u64,
    request_timeout_ms: u64,
    history_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            quote_url: "https://api.binance.com/api/v3/ticker/price".to_string(),
            quote_currency: "USDT".to_string(),
            poll_interval_ms: 2000,
            request_timeout_ms: 1500,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl FeedConfig {
    pub fn quote_url(&self) -> &str {
        &self.quote_url
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    pub fn with_quote_url(mut self, url: impl Into<String>) -> Self {
        self.quote_url = url.into();
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Shape of the synthetic asset's price ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    anchor: DateTime<Utc>,
    ramp_days: u32,
    floor: f64,
    ceiling: f64,
    /// Full width of the symmetric jitter range.
    jitter: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            ramp_days: 30,
            floor: 0.0001,
            ceiling: 0.10,
            jitter: 0.000015,
        }
    }
}

impl SyntheticConfig {
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    pub fn ramp(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.ramp_days))
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}

/// Cash amounts used by the ledger and the desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    starting_cash: f64,
    refill_amount: f64,
    /// Spend amount used when a buy names no amount.
    default_spend: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_cash: 10_000.0,
            refill_amount: 10_000.0,
            default_spend: 1_000.0,
        }
    }
}

impl LedgerConfig {
    pub fn new(starting_cash: f64, refill_amount: f64, default_spend: f64) -> Self {
        Self {
            starting_cash,
            refill_amount,
            default_spend,
        }
    }

    pub fn starting_cash(&self) -> f64 {
        self.starting_cash
    }

    pub fn refill_amount(&self) -> f64 {
        self.refill_amount
    }

    pub fn default_spend(&self) -> f64 {
        self.default_spend
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    feed: FeedConfig,
    synthetic: SyntheticConfig,
    ledger: LedgerConfig,
}

impl DeskConfig {
    /// Loads defaults, then `path` (optional), then `AURA__*` environment
    /// variables, and validates the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("AURA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let desk: DeskConfig = settings.try_deserialize()?;
        desk.validate()?;
        Ok(desk)
    }

    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    pub fn synthetic(&self) -> &SyntheticConfig {
        &self.synthetic
    }

    pub fn ledger(&self) -> &LedgerConfig {
        &self.ledger
    }

    pub fn with_feed(mut self, feed: FeedConfig) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_ledger(mut self, ledger: LedgerConfig) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.feed.poll_interval_ms == 0 {
            return invalid("feed.poll_interval_ms must be positive");
        }
        if self.feed.request_timeout_ms == 0 {
            return invalid("feed.request_timeout_ms must be positive");
        }
        if self.feed.history_capacity == 0 {
            return invalid("feed.history_capacity must be positive");
        }
        if self.feed.quote_currency.trim().is_empty() {
            return invalid("feed.quote_currency must not be empty");
        }
        if self.synthetic.ramp_days == 0 {
            return invalid("synthetic.ramp_days must be positive");
        }
        if !(self.synthetic.floor.is_finite() && self.synthetic.floor > 0.0) {
            return invalid("synthetic.floor must be positive and finite");
        }
        if !(self.synthetic.ceiling.is_finite() && self.synthetic.ceiling > self.synthetic.floor) {
            return invalid("synthetic.ceiling must be finite and above synthetic.floor");
        }
        if !(self.synthetic.jitter.is_finite() && self.synthetic.jitter >= 0.0) {
            return invalid("synthetic.jitter must be finite and not negative");
        }
        for (name, value) in [
            ("ledger.starting_cash", self.ledger.starting_cash),
            ("ledger.refill_amount", self.ledger.refill_amount),
            ("ledger.default_spend", self.ledger.default_spend),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}
