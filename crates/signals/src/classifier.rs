use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sigwatch_core::{BarSeries, Signal};
use sigwatch_indicators::series::{ema_series, rsi_series};
use sigwatch_indicators::vwap::Vwap;
use sigwatch_indicators::IndicatorError;
use tracing::debug;

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

pub const EMA_FAST_PERIOD: usize = 9;
pub const EMA_SLOW_PERIOD: usize = 21;
pub const RSI_PERIOD: usize = 14;

/// Fewer bars than this short-circuits to `Hold` without computing
/// anything.
pub const MIN_BARS: usize = 2;

/// Buy requires RSI strictly above this bound...
pub const RSI_BUY_LOWER: Decimal = dec!(50);
/// ...and at or below this one (momentum without overbought).
pub const RSI_BUY_UPPER: Decimal = dec!(65);
/// Sell requires RSI strictly below this bound.
pub const RSI_SELL_UPPER: Decimal = dec!(50);
/// Neutral stand-in when the RSI seed window has not closed yet.
pub const RSI_FALLBACK: Decimal = dec!(50);

// ---------------------------------------------------------------------------
// Indicator reading
// ---------------------------------------------------------------------------

/// The latest indicator values for one symbol, as fed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub price: Decimal,
    pub ema_fast: Decimal,
    pub ema_slow: Decimal,
    /// `None` while fewer than `RSI_PERIOD` price changes exist.
    pub rsi: Option<Decimal>,
    pub vwap: Decimal,
}

/// Compute the latest EMA(9), EMA(21), RSI(14), and whole-series VWAP
/// for a bar series. Requires at least one bar.
pub fn compute_reading(series: &BarSeries) -> Result<IndicatorReading, IndicatorError> {
    let closes = series.closes();
    let ema_fast = ema_series(&closes, EMA_FAST_PERIOD)?;
    let ema_slow = ema_series(&closes, EMA_SLOW_PERIOD)?;
    let rsi = rsi_series(&closes, RSI_PERIOD)?;

    let mut vwap = Vwap::new();
    let mut vwap_value = Decimal::ZERO;
    for bar in series.as_slice() {
        vwap_value = vwap.next_hlcv(bar.high, bar.low, bar.close, bar.volume);
    }

    // series helpers guarantee alignment, so last() mirrors the input
    Ok(IndicatorReading {
        price: *closes.last().expect("non-empty checked by ema_series"),
        ema_fast: *ema_fast.last().expect("aligned with input"),
        ema_slow: *ema_slow.last().expect("aligned with input"),
        rsi: rsi.last().copied().flatten(),
        vwap: vwap_value,
    })
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify one symbol from its latest indicator reading.
///
/// Pure and stateless: no memory of prior signals, no hysteresis. The
/// threshold operators (strict vs. inclusive) are part of the policy and
/// must not drift.
pub fn classify(reading: &IndicatorReading) -> Signal {
    let rsi = reading.rsi.unwrap_or(RSI_FALLBACK);

    let buy = reading.price > reading.ema_fast
        && reading.price > reading.ema_slow
        && rsi > RSI_BUY_LOWER
        && rsi <= RSI_BUY_UPPER
        && reading.price > reading.vwap;

    let sell = reading.price < reading.ema_fast
        && reading.price < reading.ema_slow
        && rsi < RSI_SELL_UPPER
        && reading.price < reading.vwap;

    if buy {
        Signal::Buy
    } else if sell {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Classify a full bar series: compute the indicators over the whole
/// series and classify the latest reading. Fewer than [`MIN_BARS`] bars
/// is a defined degenerate case that holds without computing anything.
pub fn classify_series(series: &BarSeries) -> Result<Signal, IndicatorError> {
    if series.len() < MIN_BARS {
        debug!(bars = series.len(), "insufficient history, holding");
        return Ok(Signal::Hold);
    }
    let reading = compute_reading(series)?;
    let signal = classify(&reading);
    debug!(?signal, ?reading, "classified series");
    Ok(signal)
}
