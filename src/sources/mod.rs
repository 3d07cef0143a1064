pub mod coingecko;

pub use coingecko::CoinGeckoClient;

use crate::types::MarketMovers;
use async_trait::async_trait;

/// Upstream market data provider.
///
/// Implementations never fail outward: network and parse errors are
/// logged and reported as "nothing available".
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    fn name(&self) -> &str;

    /// Spot price of `coin_id` quoted in `currency`, if one could be fetched.
    async fn price(&self, coin_id: &str, currency: &str) -> Option<f64>;

    /// Top gainers and losers; empty lists on failure.
    async fn movers(&self, currency: &str) -> MarketMovers;
}
