use crate::models::BarSeries;

// ---------------------------------------------------------------------------
// Bar Store Trait
// ---------------------------------------------------------------------------

/// Read access to per-symbol bar series.
///
/// The evaluation core does not own the data; it receives a lookup from
/// symbol to series. Callers must not mutate a series while an evaluation
/// over it is in flight (snapshot-then-compute).
pub trait BarStore {
    /// The stored series for a symbol, if any bars have been ingested.
    fn bars(&self, symbol: &str) -> Option<&BarSeries>;
}
