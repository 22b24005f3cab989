use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// A single daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Bar {
    /// Typical price: `(high + low + close) / 3`.
    pub fn typical_price(&self) -> Decimal {
        (self.high + self.low + self.close) / Decimal::from(3)
    }

    /// Check that the bar is well-formed: positive prices, `high >= low`,
    /// non-negative volume.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.open <= Decimal::ZERO
            || self.high <= Decimal::ZERO
            || self.low <= Decimal::ZERO
            || self.close <= Decimal::ZERO
        {
            return Err(CoreError::InvalidInput(format!(
                "bar {}: prices must be positive",
                self.date
            )));
        }
        if self.high < self.low {
            return Err(CoreError::InvalidInput(format!(
                "bar {}: high {} below low {}",
                self.date, self.high, self.low
            )));
        }
        if self.volume < Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "bar {}: negative volume {}",
                self.date, self.volume
            )));
        }
        Ok(())
    }
}

/// An append-only, strictly date-ascending series of bars for one symbol.
///
/// Bars are immutable once ingested; the series only grows by appending
/// newer bars. Both invariants are enforced at construction and on every
/// `push`, so downstream calculators may assume well-formed input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Build a series from a vec of bars, validating every bar and the
    /// date ordering invariant.
    pub fn from_bars(bars: Vec<Bar>) -> Result<Self, CoreError> {
        let mut series = Self::new();
        for bar in bars {
            series.push(bar)?;
        }
        Ok(series)
    }

    /// Append a bar strictly newer than the latest stored bar.
    pub fn push(&mut self, bar: Bar) -> Result<(), CoreError> {
        bar.validate()?;
        if let Some(last) = self.bars.last() {
            if bar.date <= last.date {
                return Err(CoreError::InvalidInput(format!(
                    "bar {} is not newer than latest bar {}",
                    bar.date, last.date
                )));
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    pub fn as_slice(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Per-symbol trading signal at one evaluation instant.
///
/// Signals are transient values recomputed from scratch on every
/// evaluation; there is no smoothing or hysteresis across time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Watchlist
// ---------------------------------------------------------------------------

/// An ordered set of symbols. Insertion order is preserved for stable
/// display; the first entry is the anchor symbol used by the portfolio
/// aggregation rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for symbol in symbols {
            list.add(symbol);
        }
        list
    }

    /// Add a symbol, ignoring duplicates. Returns `false` if it was
    /// already present.
    pub fn add(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        if self.symbols.iter().any(|s| *s == symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    /// The designated primary entry (first in insertion order).
    pub fn anchor(&self) -> Option<&str> {
        self.symbols.first().map(String::as_str)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sentiment snapshot
// ---------------------------------------------------------------------------

/// One symbol's signal within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSignal {
    pub symbol: String,
    pub signal: Signal,
}

/// The full result of one evaluation pass: every watched symbol's signal
/// in watchlist order, the buy/sell counters, and the anchor symbol's
/// signal. Rebuilt wholesale on each evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub signals: Vec<SymbolSignal>,
    pub buy_count: usize,
    pub sell_count: usize,
    pub anchor_signal: Option<Signal>,
}

impl SentimentSnapshot {
    /// Derive counters and the anchor signal from a full per-symbol pass.
    pub fn from_signals(signals: Vec<SymbolSignal>, anchor: Option<&str>) -> Self {
        let buy_count = signals.iter().filter(|s| s.signal == Signal::Buy).count();
        let sell_count = signals.iter().filter(|s| s.signal == Signal::Sell).count();
        let anchor_signal = anchor.and_then(|symbol| {
            signals
                .iter()
                .find(|s| s.symbol == symbol)
                .map(|s| s.signal)
        });
        Self {
            signals,
            buy_count,
            sell_count,
            anchor_signal,
        }
    }

    pub fn signal_for(&self, symbol: &str) -> Option<Signal> {
        self.signals
            .iter()
            .find(|s| s.symbol == symbol)
            .map(|s| s.signal)
    }
}
