use super::ApiResponse;
use crate::types::{MoversResponse, PriceQuote};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// GET /api/market/price/:coin
///
/// Always 200; an unreachable upstream yields `price: null`.
async fn get_price(
    State(state): State<AppState>,
    Path(coin): Path<String>,
) -> Json<ApiResponse<PriceQuote>> {
    let quote = state.market.price(&coin).await;
    Json(ApiResponse::new(quote))
}

/// GET /api/market/movers
async fn get_movers(State(state): State<AppState>) -> Json<ApiResponse<MoversResponse>> {
    let (movers, age) = state.market.movers().await;

    Json(ApiResponse::cached(
        MoversResponse {
            gainers: movers.gainers,
            losers: movers.losers,
            age_secs: age.map(|a| a.as_secs()).unwrap_or(0),
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
        age.is_some(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/price/:coin", get(get_price))
        .route("/movers", get(get_movers))
}
