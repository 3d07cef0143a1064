use chart_mentor::{app, config::Config, AppState};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chart_mentor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Chart Mentor on {}:{}", config.host, config.port);
    info!(
        "Market data from {} (quote {}, timeout {} ms)",
        config.coingecko_api_url, config.quote_currency, config.http_timeout_ms
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;

    // Warm the movers listing so the first request is served from cache
    {
        let market = state.market.clone();
        tokio::spawn(async move {
            let movers = market.refresh_movers().await;
            debug!(
                "Initial movers: {} gainers, {} losers",
                movers.gainers.len(),
                movers.losers.len()
            );
        });
    }

    // Periodically drop stale price entries
    {
        let market = state.market.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(60)).await;
                market.purge_expired();
            }
        });
    }

    let app = app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chart Mentor listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
