use crate::Indicator;
use rust_decimal::Decimal;

/// Exponential Moving Average (EMA).
///
/// Seeds from the first value directly rather than from an SMA over the
/// first `period` inputs: `E[0] = C[0]`, then
/// `E[i] = (C[i] - E[i-1]) * k + E[i-1]` with `k = 2 / (period + 1)`.
/// The seed choice is load-bearing for output parity with the signal
/// policy; do not switch it to SMA seeding.
#[derive(Debug, Clone)]
pub struct Ema {
    len: usize,
    multiplier: Decimal,
    current: Option<Decimal>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        let multiplier = Decimal::TWO / (Decimal::from(period) + Decimal::ONE);
        Self {
            len: period,
            multiplier,
            current: None,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.current
    }
}

impl Indicator for Ema {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        let next = match self.current {
            None => value,
            Some(prev) => (value - prev) * self.multiplier + prev,
        };
        self.current = Some(next);
        self.current
    }

    fn reset(&mut self) {
        self.current = None;
    }

    fn period(&self) -> usize {
        self.len
    }

    fn is_ready(&self) -> bool {
        self.current.is_some()
    }
}
