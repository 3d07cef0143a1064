//! Decision engine endpoints.

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::decide;
use crate::types::{IndicatorState, Recommendation};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

/// A reading from the configured indicator source and its decision.
#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub source: String,
    pub indicators: IndicatorState,
    pub recommendation: Recommendation,
}

/// POST /api/decision
async fn post_decision(
    Json(indicators): Json<IndicatorState>,
) -> Result<Json<ApiResponse<Recommendation>>> {
    indicators.validate().map_err(AppError::BadRequest)?;
    Ok(Json(ApiResponse::new(decide(&indicators))))
}

/// GET /api/decision/sample
async fn get_sample(State(state): State<AppState>) -> Json<ApiResponse<SampleResponse>> {
    let indicators = state.indicators.read();
    Json(ApiResponse::new(SampleResponse {
        source: state.indicators.name().to_string(),
        indicators,
        recommendation: decide(&indicators),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(post_decision))
        .route("/sample", get(get_sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BollingerPosition, MacdSignal, TradeSignal};

    #[tokio::test]
    async fn test_post_decision_handler() {
        let state = IndicatorState::new(75, MacdSignal::Bearish, BollingerPosition::NearUpperBand);
        let Json(response) = post_decision(Json(state)).await.unwrap();
        assert_eq!(response.data.signal, TradeSignal::Short);
        assert!(!response.meta.cached);
    }

    #[tokio::test]
    async fn test_post_decision_rejects_rsi_over_100() {
        let state = IndicatorState::new(150, MacdSignal::Bearish, BollingerPosition::NearUpperBand);
        let result = post_decision(Json(state)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
