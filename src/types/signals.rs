use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the RSI oscillator.
pub const RSI_MAX: u8 = 100;

/// Direction of the MACD line relative to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

impl MacdSignal {
    pub fn label(&self) -> &'static str {
        match self {
            MacdSignal::Bullish => "Bullish",
            MacdSignal::Bearish => "Bearish",
        }
    }
}

/// Where price sits relative to the Bollinger bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerPosition {
    NearUpperBand,
    NearLowerBand,
}

impl BollingerPosition {
    pub fn label(&self) -> &'static str {
        match self {
            BollingerPosition::NearUpperBand => "Price near Upper Band",
            BollingerPosition::NearLowerBand => "Price near Lower Band",
        }
    }
}

/// Indicator readings for a single analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Relative Strength Index, 0-100.
    pub rsi: u8,
    pub macd: MacdSignal,
    pub bollinger: BollingerPosition,
}

impl IndicatorState {
    pub fn new(rsi: u8, macd: MacdSignal, bollinger: BollingerPosition) -> Self {
        Self {
            rsi,
            macd,
            bollinger,
        }
    }

    /// Check that the RSI reading is inside the oscillator range.
    pub fn validate(&self) -> Result<(), String> {
        if self.rsi > RSI_MAX {
            return Err(format!("RSI must be within 0-{}, got {}", RSI_MAX, self.rsi));
        }
        Ok(())
    }
}

/// Discrete trade call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSignal {
    Long,
    Short,
    Wait,
}

impl TradeSignal {
    pub fn label(&self) -> &'static str {
        match self {
            TradeSignal::Long => "LONG",
            TradeSignal::Short => "SHORT",
            TradeSignal::Wait => "WAIT",
        }
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the decision rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub signal: TradeSignal,
    pub rationale: String,
    /// 1-based position of the rule that fired; the fallback is the last rule.
    pub rule: u8,
}
