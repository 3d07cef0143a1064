use serde::{Deserialize, Serialize};

/// Spot price lookup result.
///
/// `price` is `None` when the upstream could not be reached or returned
/// nothing usable for the coin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub coin: String,
    pub currency: String,
    pub price: Option<f64>,
    /// Unix timestamp (milliseconds) when the quote was taken.
    pub timestamp: i64,
}

impl PriceQuote {
    pub fn available(coin: &str, currency: &str, price: f64) -> Self {
        Self {
            coin: coin.to_string(),
            currency: currency.to_string(),
            price: Some(price),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn unavailable(coin: &str, currency: &str) -> Self {
        Self {
            coin: coin.to_string(),
            currency: currency.to_string(),
            price: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.price.is_some()
    }
}

/// A single mover entry (gainer or loser).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub name: String,
    pub symbol: String,
    /// 24h change in percent; upstream occasionally omits it.
    pub change_percent: Option<f64>,
}

/// Top gainers and losers over the last 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketMovers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
}

impl MarketMovers {
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.losers.is_empty()
    }
}

/// Response for the top movers endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoversResponse {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
    /// Seconds since the listing was fetched.
    pub age_secs: u64,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_quote_unavailable_serializes_null() {
        let quote = PriceQuote::unavailable("pepe", "usdt");
        assert!(!quote.is_available());

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"price\":null"));
        assert!(json.contains("\"coin\":\"pepe\""));
    }

    #[test]
    fn test_price_quote_available() {
        let quote = PriceQuote::available("bitcoin", "usdt", 64_000.5);
        assert!(quote.is_available());
        assert_eq!(quote.price, Some(64_000.5));
        assert!(quote.timestamp > 0);
    }

    #[test]
    fn test_mover_serialization() {
        let mover = Mover {
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            change_percent: Some(2.5),
        };
        let json = serde_json::to_string(&mover).unwrap();
        assert!(json.contains("\"changePercent\":2.5"));
    }

    #[test]
    fn test_market_movers_is_empty() {
        assert!(MarketMovers::default().is_empty());
    }
}
