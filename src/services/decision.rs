//! Rule-based trade decision.
//!
//! Rules are checked top to bottom and the first match wins. The order
//! is the tie-break policy: keep it when adding rules.

use crate::types::{BollingerPosition, IndicatorState, MacdSignal, Recommendation, TradeSignal};

/// RSI strictly below this is oversold.
pub const RSI_OVERSOLD: u8 = 30;
/// RSI strictly above this is overbought.
pub const RSI_OVERBOUGHT: u8 = 70;

pub const RATIONALE_OVERSOLD: &str = "oversold RSI with bullish momentum.";
pub const RATIONALE_OVERBOUGHT: &str = "overbought RSI with bearish momentum.";
pub const RATIONALE_UPPER_BAND: &str = "price stretched to upper band with bearish momentum.";
pub const RATIONALE_LOWER_BAND: &str = "price stretched to lower band with bullish momentum.";
pub const RATIONALE_NO_SIGNAL: &str = "no confluent signal.";

fn recommend(signal: TradeSignal, rationale: &str, rule: u8) -> Recommendation {
    Recommendation {
        signal,
        rationale: rationale.to_string(),
        rule,
    }
}

/// Map an indicator reading to exactly one recommendation.
pub fn decide(state: &IndicatorState) -> Recommendation {
    let bullish = state.macd == MacdSignal::Bullish;
    let bearish = state.macd == MacdSignal::Bearish;

    if state.rsi < RSI_OVERSOLD && bullish {
        recommend(TradeSignal::Long, RATIONALE_OVERSOLD, 1)
    } else if state.rsi > RSI_OVERBOUGHT && bearish {
        recommend(TradeSignal::Short, RATIONALE_OVERBOUGHT, 2)
    } else if state.bollinger == BollingerPosition::NearUpperBand && bearish {
        recommend(TradeSignal::Short, RATIONALE_UPPER_BAND, 3)
    } else if state.bollinger == BollingerPosition::NearLowerBand && bullish {
        recommend(TradeSignal::Long, RATIONALE_LOWER_BAND, 4)
    } else {
        recommend(TradeSignal::Wait, RATIONALE_NO_SIGNAL, 5)
    }
}
