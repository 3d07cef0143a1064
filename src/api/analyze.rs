//! Chart upload endpoint.

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{AnalysisRequest, UploadedChart};
use crate::types::{AnalysisBatch, Leverage, TradeParams};
use crate::AppState;
use axum::{
    extract::{Multipart, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

/// Query parameters for the analyze endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    /// Include the per-row edge density profile in each report.
    #[serde(default)]
    pub include_profile: bool,
}

/// Form fields collected from a multipart upload.
#[derive(Debug)]
struct UploadForm {
    files: Vec<UploadedChart>,
    coin: Option<String>,
    leverage: Leverage,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm {
        files: Vec::new(),
        coin: None,
        leverage: Leverage::default(),
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match (name.as_str(), file_name) {
            ("coin", None) => {
                let coin = field.text().await?;
                if !coin.trim().is_empty() {
                    form.coin = Some(coin);
                }
            }
            ("leverage", None) => {
                let raw = field.text().await?;
                form.leverage = Leverage::parse(&raw).map_err(AppError::BadRequest)?;
            }
            (_, Some(file_name)) => {
                let bytes = field.bytes().await?;
                debug!("Received upload {} ({} bytes)", file_name, bytes.len());
                form.files.push(UploadedChart::new(file_name, bytes.to_vec()));
            }
            ("file" | "files", None) => {
                let bytes = field.bytes().await?;
                let file_name = format!("upload-{}", form.files.len() + 1);
                form.files.push(UploadedChart::new(file_name, bytes.to_vec()));
            }
            (other, None) => debug!("Ignoring form field {}", other),
        }
    }

    Ok(form)
}

/// POST /api/analyze
///
/// Multipart form: one or more image parts, optional `coin` and `leverage`.
async fn analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<AnalysisBatch>>> {
    let form = read_form(multipart).await?;
    if form.files.is_empty() {
        return Err(AppError::BadRequest(
            "Upload at least one chart image".to_string(),
        ));
    }

    let request = AnalysisRequest {
        coin: form
            .coin
            .unwrap_or_else(|| state.config.default_coin.clone()),
        params: TradeParams::new(form.leverage),
        include_profile: query.include_profile,
    };

    let batch = state.analyzer.analyze_batch(form.files, &request).await;
    Ok(Json(ApiResponse::new(batch)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze))
}
