//! Indicator sources feeding the decision rules.
//!
//! Real RSI/MACD/Bollinger computation is not wired in yet; the default
//! source draws random readings. Anything implementing [`IndicatorSource`]
//! can be swapped in.

use crate::types::{BollingerPosition, IndicatorState, MacdSignal};
use rand::Rng;

/// Lowest RSI the mock source will emit.
pub const MOCK_RSI_MIN: u8 = 20;
/// Highest RSI the mock source will emit.
pub const MOCK_RSI_MAX: u8 = 80;

/// Supplies indicator readings for an analysis request.
pub trait IndicatorSource: Send + Sync {
    /// Short identifier shown in logs.
    fn name(&self) -> &str;

    /// Produce a fresh reading.
    fn read(&self) -> IndicatorState;
}

/// Random placeholder readings.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockIndicatorSource;

impl MockIndicatorSource {
    pub fn new() -> Self {
        Self
    }

    /// Draw a reading from the given RNG.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> IndicatorState {
        let rsi = rng.gen_range(MOCK_RSI_MIN..=MOCK_RSI_MAX);
        let macd = if rng.gen_bool(0.5) {
            MacdSignal::Bullish
        } else {
            MacdSignal::Bearish
        };
        let bollinger = if rng.gen_bool(0.5) {
            BollingerPosition::NearUpperBand
        } else {
            BollingerPosition::NearLowerBand
        };

        IndicatorState::new(rsi, macd, bollinger)
    }
}

impl IndicatorSource for MockIndicatorSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn read(&self) -> IndicatorState {
        Self::sample(&mut rand::thread_rng())
    }
}

/// Always returns the same reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedIndicatorSource {
    state: IndicatorState,
}

impl FixedIndicatorSource {
    pub fn new(state: IndicatorState) -> Self {
        Self { state }
    }
}

impl IndicatorSource for FixedIndicatorSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn read(&self) -> IndicatorState {
        self.state
    }
}
