use rust_decimal::Decimal;

/// Volume Weighted Average Price (VWAP).
///
/// Whole-window VWAP over whatever bars it is fed; the caller decides the
/// window and calls `reset()` if it ever needs to start over. With zero
/// cumulative volume the latest close is reported instead, signalling
/// that no informative volume weighting is available.
#[derive(Debug, Clone)]
pub struct Vwap {
    cumulative_tp_vol: Decimal,
    cumulative_vol: Decimal,
    last_close: Option<Decimal>,
}

impl Vwap {
    pub fn new() -> Self {
        Self {
            cumulative_tp_vol: Decimal::ZERO,
            cumulative_vol: Decimal::ZERO,
            last_close: None,
        }
    }

    /// Feed high, low, close, volume and return the running VWAP.
    pub fn next_hlcv(
        &mut self,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Decimal {
        let typical_price = (high + low + close) / Decimal::from(3);
        self.cumulative_tp_vol += typical_price * volume;
        self.cumulative_vol += volume;
        self.last_close = Some(close);

        self.value().unwrap_or(close)
    }

    pub fn value(&self) -> Option<Decimal> {
        if self.cumulative_vol.is_zero() {
            self.last_close
        } else {
            Some(self.cumulative_tp_vol / self.cumulative_vol)
        }
    }

    pub fn reset(&mut self) {
        self.cumulative_tp_vol = Decimal::ZERO;
        self.cumulative_vol = Decimal::ZERO;
        self.last_close = None;
    }
}

impl Default for Vwap {
    fn default() -> Self {
        Self::new()
    }
}
