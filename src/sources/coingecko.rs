//! CoinGecko REST client for spot prices and 24h movers.

use super::MarketDataSource;
use crate::types::{MarketMovers, Mover};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Coins requested from the markets endpoint.
const MOVERS_PAGE_SIZE: usize = 10;
/// Coins taken from each end of the listing.
const MOVERS_PER_SIDE: usize = 5;

/// CoinGecko market row; only the fields the movers list needs.
#[derive(Debug, Deserialize)]
struct CoinGeckoMarket {
    name: String,
    symbol: String,
    price_change_percentage_24h: Option<f64>,
}

impl From<CoinGeckoMarket> for Mover {
    fn from(market: CoinGeckoMarket) -> Self {
        Mover {
            name: market.name,
            symbol: market.symbol,
            change_percent: market.price_change_percentage_24h,
        }
    }
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client with a bounded request timeout.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("ChartMentor/0.1 (Chart Analyzer)")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", "application/json");

        match self.api_key {
            Some(ref key) => request.header("x-cg-demo-api-key", key),
            None => request,
        }
    }

    /// Fetch the spot price of one coin.
    ///
    /// `Ok(None)` means the request succeeded but the body had no usable
    /// price for this coin.
    pub async fn fetch_price(&self, coin_id: &str, currency: &str) -> anyhow::Result<Option<f64>> {
        let response = self
            .get("/simple/price")
            .query(&[("ids", coin_id), ("vs_currencies", currency)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("CoinGecko API returned {}: {}", status, snippet);
            anyhow::bail!("CoinGecko API error: {}", status);
        }

        let body: serde_json::Value = response.json().await?;
        let price = body
            .get(coin_id)
            .and_then(|quotes| quotes.get(currency))
            .and_then(serde_json::Value::as_f64)
            .filter(|p| p.is_finite() && *p > 0.0);

        debug!("CoinGecko price {} in {}: {:?}", coin_id, currency, price);
        Ok(price)
    }

    /// Fetch the 24h movers listing and split it into gainers and losers.
    pub async fn fetch_movers(&self, currency: &str) -> anyhow::Result<MarketMovers> {
        let per_page = MOVERS_PAGE_SIZE.to_string();
        let response = self
            .get("/coins/markets")
            .query(&[
                ("vs_currency", currency),
                ("order", "percent_change_24h_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("CoinGecko API returned {}: {}", status, snippet);
            anyhow::bail!("CoinGecko API error: {}", status);
        }

        let markets: Vec<CoinGeckoMarket> = response.json().await?;
        debug!("CoinGecko returned {} market rows", markets.len());

        Ok(split_movers(markets))
    }
}

/// Take the head of the listing as gainers and the tail as losers.
///
/// A listing shorter than twice [`MOVERS_PER_SIDE`] shows some coins on
/// both sides.
fn split_movers(markets: Vec<CoinGeckoMarket>) -> MarketMovers {
    let movers: Vec<Mover> = markets.into_iter().map(Mover::from).collect();
    let tail_start = movers.len().saturating_sub(MOVERS_PER_SIDE);

    MarketMovers {
        gainers: movers.iter().take(MOVERS_PER_SIDE).cloned().collect(),
        losers: movers[tail_start..].to_vec(),
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn price(&self, coin_id: &str, currency: &str) -> Option<f64> {
        match self.fetch_price(coin_id, currency).await {
            Ok(price) => price,
            Err(e) => {
                warn!("CoinGecko price fetch failed for {}: {}", coin_id, e);
                None
            }
        }
    }

    async fn movers(&self, currency: &str) -> MarketMovers {
        match self.fetch_movers(currency).await {
            Ok(movers) => movers,
            Err(e) => {
                warn!("CoinGecko movers fetch failed: {}", e);
                MarketMovers::default()
            }
        }
    }
}
