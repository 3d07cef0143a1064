//! Chart Mentor - chart screenshot analysis and trade recommendations

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::{extract::DefaultBodyLimit, Router};
use config::Config;
use services::{ChartAnalyzer, IndicatorSource, MarketService, MockIndicatorSource};
use sources::{CoinGeckoClient, MarketDataSource};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub market: Arc<MarketService>,
    pub analyzer: Arc<ChartAnalyzer>,
    pub indicators: Arc<dyn IndicatorSource>,
}

impl AppState {
    /// Wire up the production collaborators: CoinGecko and mock indicators.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let coingecko = CoinGeckoClient::new(
            &config.coingecko_api_url,
            config.coingecko_api_key.clone(),
            config.http_timeout(),
        )?;

        Ok(Self::with_sources(
            config,
            Arc::new(coingecko),
            Arc::new(MockIndicatorSource::new()),
        ))
    }

    /// Build state around explicit market and indicator sources.
    pub fn with_sources(
        config: Config,
        market_source: Arc<dyn MarketDataSource>,
        indicators: Arc<dyn IndicatorSource>,
    ) -> Self {
        let market = Arc::new(MarketService::new(
            market_source,
            &config.quote_currency,
            config.price_ttl(),
            config.movers_ttl(),
        ));
        let analyzer = Arc::new(ChartAnalyzer::new(market.clone(), indicators.clone()));

        Self {
            config: Arc::new(config),
            market,
            analyzer,
            indicators,
        }
    }
}

/// Build the full HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use types::*;
