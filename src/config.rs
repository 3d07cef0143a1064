use std::env;
use std::time::Duration;

use crate::sources::coingecko::COINGECKO_API_URL;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CoinGecko REST base URL.
    pub coingecko_api_url: String,
    /// CoinGecko API key (optional, demo/pro tier).
    pub coingecko_api_key: Option<String>,
    /// Currency prices are quoted in.
    pub quote_currency: String,
    /// Timeout for every outbound HTTP request (ms).
    pub http_timeout_ms: u64,
    /// How long a fetched spot price is reused (seconds).
    pub price_ttl_secs: u64,
    /// How long the movers listing is reused (seconds).
    pub movers_ttl_secs: u64,
    /// Coin used when an upload does not name one.
    pub default_coin: String,
    /// Maximum multipart request size (MB).
    pub max_upload_mb: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3002),
            coingecko_api_url: env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| COINGECKO_API_URL.to_string()),
            coingecko_api_key: env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            quote_currency: env::var("QUOTE_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|_| "usdt".to_string()),
            http_timeout_ms: env::var("HTTP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8_000),
            price_ttl_secs: env::var("PRICE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            movers_ttl_secs: env::var("MOVERS_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            default_coin: env::var("DEFAULT_COIN").unwrap_or_else(|_| "bitcoin".to_string()),
            max_upload_mb: env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn price_ttl(&self) -> Duration {
        Duration::from_secs(self.price_ttl_secs)
    }

    pub fn movers_ttl(&self) -> Duration {
        Duration::from_secs(self.movers_ttl_secs)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            coingecko_api_url: COINGECKO_API_URL.to_string(),
            coingecko_api_key: None,
            quote_currency: "usdt".to_string(),
            http_timeout_ms: 8_000,
            price_ttl_secs: 30,
            movers_ttl_secs: 300,
            default_coin: "bitcoin".to_string(),
            max_upload_mb: 20,
        }
    }
}
