//! Binance public ticker endpoint as a `QuoteSource`.

use crate::config::FeedConfig;
use async_trait::async_trait;
use aura::{FeedError, Quote, QuoteSource};
use log::debug;
use serde_json::Value;

/// Polls `GET /api/v3/ticker/price`, which lists the last price of every
/// listed pair as `[{"symbol": "BTCUSDT", "price": "50000.01"}, ...]`.
pub struct BinanceQuoteSource {
    client: reqwest::Client,
    url: String,
}

impl BinanceQuoteSource {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.quote_url().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuoteSource for BinanceQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        decode_tickers(body)
    }
}

/// Turns a ticker payload into quotes.
///
/// Accepts the list form and the single-ticker object form. Entries without a
/// usable symbol or price are dropped; numeric prices are stringified so the
/// feed parses every price the same way.
pub fn decode_tickers(body: Value) -> Result<Vec<Quote>, FeedError> {
    let entries = match body {
        Value::Array(entries) => entries,
        entry @ Value::Object(_) => vec![entry],
        other => {
            return Err(FeedError::Malformed(format!(
                "expected a list of tickers, got {}",
                kind(&other)
            )))
        }
    };

    let quotes = entries
        .into_iter()
        .filter_map(|entry| {
            let symbol = entry.get("symbol").and_then(Value::as_str)?;
            let price = match entry.get("price") {
                Some(Value::String(price)) => price.clone(),
                Some(Value::Number(price)) => price.to_string(),
                _ => {
                    debug!("Ticker {} carries no price, skipping", symbol);
                    return None;
                }
            };
            Some(Quote::new(symbol, price))
        })
        .collect();

    Ok(quotes)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_ticker_list() {
        let body = json!([
            {"symbol": "BTCUSDT", "price": "50000.01"},
            {"symbol": "ETHBTC", "price": "0.05"}
        ]);

        let quotes = decode_tickers(body).unwrap();

        assert_eq!(
            quotes,
            vec![Quote::new("BTCUSDT", "50000.01"), Quote::new("ETHBTC", "0.05")]
        );
    }

    #[test]
    fn test_skips_incomplete_entries() {
        let body = json!([
            {"symbol": "BTCUSDT"},
            {"price": "1.0"},
            {"symbol": "SOLUSDT", "price": 150.5},
            "garbage"
        ]);

        let quotes = decode_tickers(body).unwrap();

        assert_eq!(quotes, vec![Quote::new("SOLUSDT", "150.5")]);
    }

    #[test]
    fn test_accepts_single_ticker_object() {
        let quotes = decode_tickers(json!({"symbol": "DOGEUSDT", "price": "0.12"})).unwrap();
        assert_eq!(quotes, vec![Quote::new("DOGEUSDT", "0.12")]);
    }

    #[test]
    fn test_rejects_non_list_payload() {
        let err = decode_tickers(json!("maintenance")).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn test_builds_from_config() {
        let source = BinanceQuoteSource::new(&FeedConfig::default()).unwrap();
        assert_eq!(source.url(), "https://api.binance.com/api/v3/ticker/price");
    }
}
