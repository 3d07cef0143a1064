pub mod analyzer;
pub mod cache;
pub mod chart;
pub mod decision;
pub mod indicators;
pub mod market;

pub use analyzer::{AnalysisRequest, ChartAnalyzer, UploadedChart};
pub use cache::{TtlCache, TtlSlot};
pub use chart::{analyze_bytes, decode_image, detect_extrema, extract_profile, ChartError};
pub use decision::decide;
pub use indicators::{FixedIndicatorSource, IndicatorSource, MockIndicatorSource};
pub use market::MarketService;
