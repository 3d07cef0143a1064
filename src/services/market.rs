//! Cached access to spot prices and the 24h movers listing.

use super::cache::{TtlCache, TtlSlot};
use crate::sources::MarketDataSource;
use crate::types::{MarketMovers, PriceQuote};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Normalize a user-entered coin identifier (`" Bitcoin "` → `"bitcoin"`).
pub fn normalize_coin_id(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Price and movers lookups in front of a [`MarketDataSource`].
///
/// Only successful results are cached, so an outage is retried on the
/// next request instead of being pinned for a whole TTL.
pub struct MarketService {
    source: Arc<dyn MarketDataSource>,
    currency: String,
    prices: TtlCache<f64>,
    movers: TtlSlot<MarketMovers>,
}

impl MarketService {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        currency: &str,
        price_ttl: Duration,
        movers_ttl: Duration,
    ) -> Self {
        Self {
            source,
            currency: currency.to_lowercase(),
            prices: TtlCache::new(price_ttl),
            movers: TtlSlot::new(movers_ttl),
        }
    }

    fn price_key(&self, coin_id: &str) -> String {
        format!("{}:{}", coin_id, self.currency)
    }

    /// Current price of a coin, or an unavailable quote.
    pub async fn price(&self, coin: &str) -> PriceQuote {
        let coin_id = normalize_coin_id(coin);
        if coin_id.is_empty() {
            return PriceQuote::unavailable(&coin_id, &self.currency);
        }

        let key = self.price_key(&coin_id);
        if let Some(price) = self.prices.get(&key) {
            debug!("Price cache hit for {}", key);
            return PriceQuote::available(&coin_id, &self.currency, price);
        }

        match self.source.price(&coin_id, &self.currency).await {
            Some(price) => {
                self.prices.insert(key, price);
                PriceQuote::available(&coin_id, &self.currency, price)
            }
            None => PriceQuote::unavailable(&coin_id, &self.currency),
        }
    }

    /// Movers listing, refreshed when the cached copy has expired.
    ///
    /// The age is `Some` when the listing was served from cache.
    pub async fn movers(&self) -> (MarketMovers, Option<Duration>) {
        if let Some((movers, age)) = self.movers.get_with_age() {
            return (movers, Some(age));
        }
        (self.refresh_movers().await, None)
    }

    /// Fetch the movers listing now and replace the cached copy.
    pub async fn refresh_movers(&self) -> MarketMovers {
        let movers = self.source.movers(&self.currency).await;
        if movers.is_empty() {
            debug!("Movers listing from {} is empty, not caching", self.source.name());
        } else {
            info!(
                "Refreshed movers from {}: {} gainers, {} losers",
                self.source.name(),
                movers.gainers.len(),
                movers.losers.len()
            );
            self.movers.set(movers.clone());
        }
        movers
    }

    /// Drop expired price entries.
    pub fn purge_expired(&self) {
        self.prices.purge_expired();
    }
}
