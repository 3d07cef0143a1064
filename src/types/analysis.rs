use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExtremumSet, ImageSize, IndicatorState, PriceQuote, Profile, Recommendation};

/// Flat platform fee, quoted in the settlement currency.
pub const FLAT_FEE: f64 = 2.0;

/// Leverage multiplier chosen by the caller.
///
/// Only echoed back alongside the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Leverage(u8);

impl Leverage {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 30;
    pub const DEFAULT: u8 = 10;

    pub fn new(value: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "Leverage must be between {}x and {}x, got {}x",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Parse a leverage from form input such as `"10"` or `"10x"`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim().trim_end_matches(['x', 'X']);
        let value: u8 = trimmed
            .parse()
            .map_err(|_| format!("Invalid leverage: {}", input))?;
        Self::new(value)
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u8> for Leverage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Leverage> for u8 {
    fn from(leverage: Leverage) -> Self {
        leverage.0
    }
}

/// Caller-supplied trade parameters, echoed in every report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeParams {
    pub leverage: Leverage,
    pub fee: f64,
}

impl TradeParams {
    pub fn new(leverage: Leverage) -> Self {
        Self {
            leverage,
            fee: FLAT_FEE,
        }
    }
}

impl Default for TradeParams {
    fn default() -> Self {
        Self::new(Leverage::default())
    }
}

/// Everything computed for one successfully decoded chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub size: ImageSize,
    pub extrema: ExtremumSet,
    pub peak_count: usize,
    pub trough_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub indicators: IndicatorState,
    pub recommendation: Recommendation,
    pub price: PriceQuote,
}

/// Result of analysing one uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed(Box<ChartReport>),
    Failed { error: String },
}

impl AnalysisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&ChartReport> {
        match self {
            AnalysisOutcome::Completed(report) => Some(report),
            AnalysisOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub id: Uuid,
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// Results for one upload request, in upload order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBatch {
    pub params: TradeParams,
    pub coin: String,
    pub files: Vec<FileAnalysis>,
    pub completed: usize,
    pub failed: usize,
    pub timestamp: i64,
}
