//! Per-upload chart analysis.
//!
//! Each file runs through decode → profile → extrema on a blocking
//! worker, then gets an indicator reading and a recommendation. Files
//! are processed one after another and a failure in one never stops the
//! rest of the batch.

use super::chart::{self, ChartFeatures};
use super::decision::decide;
use super::indicators::IndicatorSource;
use super::market::{normalize_coin_id, MarketService};
use crate::types::{
    AnalysisBatch, AnalysisOutcome, ChartReport, FileAnalysis, PriceQuote, TradeParams,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Raw bytes of one uploaded chart.
#[derive(Debug, Clone)]
pub struct UploadedChart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedChart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Options shared by every file in a batch.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub coin: String,
    pub params: TradeParams,
    /// Include the full per-row profile in each report.
    pub include_profile: bool,
}

/// Runs the analysis pipeline for uploaded charts.
pub struct ChartAnalyzer {
    market: Arc<MarketService>,
    indicators: Arc<dyn IndicatorSource>,
}

impl ChartAnalyzer {
    pub fn new(market: Arc<MarketService>, indicators: Arc<dyn IndicatorSource>) -> Self {
        Self { market, indicators }
    }

    /// Analyse every file in upload order.
    pub async fn analyze_batch(
        &self,
        files: Vec<UploadedChart>,
        request: &AnalysisRequest,
    ) -> AnalysisBatch {
        let coin = normalize_coin_id(&request.coin);
        let price = self.market.price(&coin).await;
        if !price.is_available() {
            warn!("No price available for {}", coin);
        }

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.analyze_file(file, &price, request.include_profile).await);
        }

        let completed = results.iter().filter(|r| r.outcome.is_completed()).count();
        let failed = results.len() - completed;
        info!(
            "Analysed {} chart(s) for {}: {} completed, {} failed",
            results.len(),
            coin,
            completed,
            failed
        );

        AnalysisBatch {
            params: request.params,
            coin,
            files: results,
            completed,
            failed,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Analyse a single file; errors become a failed outcome.
    pub async fn analyze_file(
        &self,
        file: UploadedChart,
        price: &PriceQuote,
        include_profile: bool,
    ) -> FileAnalysis {
        let id = Uuid::new_v4();
        let UploadedChart { file_name, bytes } = file;

        let features = match tokio::task::spawn_blocking(move || chart::analyze_bytes(&bytes)).await
        {
            Ok(Ok(features)) => features,
            Ok(Err(e)) => {
                warn!("Skipping {}: {}", file_name, e);
                return FileAnalysis {
                    id,
                    file_name,
                    outcome: AnalysisOutcome::Failed {
                        error: e.to_string(),
                    },
                };
            }
            Err(e) => {
                warn!("Analysis task for {} aborted: {}", file_name, e);
                return FileAnalysis {
                    id,
                    file_name,
                    outcome: AnalysisOutcome::Failed {
                        error: "analysis aborted".to_string(),
                    },
                };
            }
        };

        let report = self.build_report(features, price.clone(), include_profile);
        info!(
            "{}: {}x{} px, {} peaks, {} troughs, RSI {}, MACD {}, {} -> {} (rule {})",
            file_name,
            report.size.width,
            report.size.height,
            report.peak_count,
            report.trough_count,
            report.indicators.rsi,
            report.indicators.macd.label(),
            report.indicators.bollinger.label(),
            report.recommendation.signal,
            report.recommendation.rule
        );

        FileAnalysis {
            id,
            file_name,
            outcome: AnalysisOutcome::Completed(Box::new(report)),
        }
    }

    fn build_report(
        &self,
        features: ChartFeatures,
        price: PriceQuote,
        include_profile: bool,
    ) -> ChartReport {
        let ChartFeatures {
            size,
            profile,
            extrema,
        } = features;

        // Extrema are reported only; the decision uses indicators alone.
        let indicators = self.indicators.read();
        let recommendation = decide(&indicators);

        ChartReport {
            size,
            peak_count: extrema.peak_count(),
            trough_count: extrema.trough_count(),
            extrema,
            profile: include_profile.then_some(profile),
            indicators,
            recommendation,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::FixedIndicatorSource;
    use crate::sources::MarketDataSource;
    use crate::types::{
        BollingerPosition, IndicatorState, Leverage, MacdSignal, MarketMovers, TradeSignal,
    };
    use async_trait::async_trait;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::time::Duration;

    struct OfflineSource;

    #[async_trait]
    impl MarketDataSource for OfflineSource {
        fn name(&self) -> &str {
            "offline"
        }

        async fn price(&self, _coin_id: &str, _currency: &str) -> Option<f64> {
            None
        }

        async fn movers(&self, _currency: &str) -> MarketMovers {
            MarketMovers::default()
        }
    }

    fn analyzer(state: IndicatorState) -> ChartAnalyzer {
        let market = Arc::new(MarketService::new(
            Arc::new(OfflineSource),
            "usdt",
            Duration::from_secs(30),
            Duration::from_secs(300),
        ));
        ChartAnalyzer::new(market, Arc::new(FixedIndicatorSource::new(state)))
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([30, 30, 30]));
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            coin: " Bitcoin ".to_string(),
            params: TradeParams::new(Leverage::new(12).unwrap()),
            include_profile: true,
        }
    }

    #[tokio::test]
    async fn test_batch_isolates_bad_file() {
        let analyzer = analyzer(IndicatorState::new(
            25,
            MacdSignal::Bullish,
            BollingerPosition::NearLowerBand,
        ));
        let files = vec![
            UploadedChart::new("good.png", png_bytes(20, 15)),
            UploadedChart::new("bad.png", b"not an image".to_vec()),
            UploadedChart::new("also_good.png", png_bytes(8, 4)),
        ];

        let batch = analyzer.analyze_batch(files, &request()).await;

        assert_eq!(batch.files.len(), 3);
        assert_eq!(batch.completed, 2);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.coin, "bitcoin");
        assert_eq!(batch.params.leverage.value(), 12);

        assert_eq!(batch.files[0].file_name, "good.png");
        assert!(batch.files[0].outcome.is_completed());
        assert!(!batch.files[1].outcome.is_completed());
        assert_eq!(batch.files[2].file_name, "also_good.png");
    }

    #[tokio::test]
    async fn test_report_contents() {
        let analyzer = analyzer(IndicatorState::new(
            50,
            MacdSignal::Bullish,
            BollingerPosition::NearUpperBand,
        ));
        let batch = analyzer
            .analyze_batch(vec![UploadedChart::new("flat.png", png_bytes(20, 15))], &request())
            .await;

        let report = batch.files[0].outcome.report().unwrap();
        assert_eq!(report.size.height, 15);
        assert_eq!(report.profile.as_ref().unwrap().len(), 15);
        assert!(report.extrema.is_empty());
        assert_eq!(report.recommendation.signal, TradeSignal::Wait);
        assert!(!report.price.is_available());
    }

    #[tokio::test]
    async fn test_profile_omitted_by_default() {
        let analyzer = analyzer(IndicatorState::new(
            50,
            MacdSignal::Bearish,
            BollingerPosition::NearUpperBand,
        ));
        let mut req = request();
        req.include_profile = false;

        let batch = analyzer
            .analyze_batch(vec![UploadedChart::new("a.png", png_bytes(5, 5))], &req)
            .await;

        let report = batch.files[0].outcome.report().unwrap();
        assert!(report.profile.is_none());
        assert_eq!(report.recommendation.signal, TradeSignal::Short);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let analyzer = analyzer(IndicatorState::new(
            50,
            MacdSignal::Bearish,
            BollingerPosition::NearUpperBand,
        ));
        let batch = analyzer.analyze_batch(Vec::new(), &request()).await;
        assert!(batch.files.is_empty());
        assert_eq!(batch.completed, 0);
        assert_eq!(batch.failed, 0);
    }
}
