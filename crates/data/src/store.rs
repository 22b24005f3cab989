use sigwatch_core::{Bar, BarSeries, BarStore, CoreError};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::csv_loader::load_bars_from_csv;
use crate::DataError;

/// In-memory per-symbol bar storage.
///
/// Series invariants (ascending dates, append-only) are enforced by
/// `BarSeries` itself; the store only routes by symbol.
#[derive(Debug, Default)]
pub struct MemoryBarStore {
    series: HashMap<String, BarSeries>,
}

impl MemoryBarStore {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    /// Replace (or create) the series for a symbol.
    pub fn insert_series(&mut self, symbol: impl Into<String>, series: BarSeries) {
        let symbol = symbol.into();
        debug!(symbol, bars = series.len(), "ingested series");
        self.series.insert(symbol, series);
    }

    /// Append one newer bar to a symbol's series, creating the series if
    /// this is the first bar seen for the symbol.
    pub fn append_bar(&mut self, symbol: impl Into<String>, bar: Bar) -> Result<(), CoreError> {
        self.series.entry(symbol.into()).or_default().push(bar)
    }

    /// Load `{symbol}.csv` for each requested symbol from a directory.
    pub fn load_csv_dir<S: AsRef<str>>(dir: &Path, symbols: &[S]) -> Result<Self, DataError> {
        let mut store = Self::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            let path = dir.join(format!("{}.csv", symbol));
            if !path.exists() {
                return Err(DataError::NotFound(format!(
                    "CSV file not found: {}",
                    path.display()
                )));
            }
            let series = load_bars_from_csv(&path)?;
            store.insert_series(symbol, series);
        }
        Ok(store)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl BarStore for MemoryBarStore {
    fn bars(&self, symbol: &str) -> Option<&BarSeries> {
        self.series.get(symbol)
    }
}
