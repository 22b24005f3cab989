use sigwatch_core::{BarStore, SentimentSnapshot, Signal, SymbolSignal, Watchlist};
use sigwatch_indicators::IndicatorError;
use tracing::debug;

use crate::classifier::classify_series;

/// Evaluate every watched symbol and build a fresh sentiment snapshot.
///
/// Pure and synchronous: the caller owns any re-evaluation cadence and
/// must keep the store stable for the duration of the call. A symbol
/// with no stored series classifies as `Hold`, the same treatment as a
/// series too short to compute indicators over.
pub fn evaluate<S: BarStore>(
    watchlist: &Watchlist,
    store: &S,
) -> Result<SentimentSnapshot, IndicatorError> {
    let mut signals = Vec::with_capacity(watchlist.len());

    for symbol in watchlist.symbols() {
        let signal = match store.bars(symbol) {
            Some(series) => classify_series(series)?,
            None => {
                debug!(symbol, "no bars stored, holding");
                Signal::Hold
            }
        };
        signals.push(SymbolSignal {
            symbol: symbol.clone(),
            signal,
        });
    }

    Ok(SentimentSnapshot::from_signals(signals, watchlist.anchor()))
}
