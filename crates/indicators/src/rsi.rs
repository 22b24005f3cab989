use crate::Indicator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Relative Strength Index (RSI).
///
/// No value is produced until `period` price changes have been observed;
/// the seed averages are the plain means of gains and losses over that
/// window, then Wilder's smoothing takes over. A zero average loss maps
/// to RSI 100 by convention, never an error.
#[derive(Debug, Clone)]
pub struct Rsi {
    len: usize,
    prev_value: Option<Decimal>,
    sum_gain: Decimal,
    sum_loss: Decimal,
    avg_gain: Option<Decimal>,
    avg_loss: Option<Decimal>,
    count: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be > 0");
        Self {
            len: period,
            prev_value: None,
            sum_gain: Decimal::ZERO,
            sum_loss: Decimal::ZERO,
            avg_gain: None,
            avg_loss: None,
            count: 0,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match (self.avg_gain, self.avg_loss) {
            (Some(ag), Some(al)) => {
                if al.is_zero() {
                    Some(dec!(100))
                } else {
                    let rs = ag / al;
                    Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs)))
                }
            }
            _ => None,
        }
    }
}

impl Indicator for Rsi {
    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        if let Some(prev) = self.prev_value {
            let change = value - prev;
            let gain = change.max(Decimal::ZERO);
            let loss = (-change).max(Decimal::ZERO);

            self.count += 1;

            match self.avg_gain {
                None => {
                    self.sum_gain += gain;
                    self.sum_loss += loss;

                    if self.count >= self.len {
                        let period_dec = Decimal::from(self.len);
                        self.avg_gain = Some(self.sum_gain / period_dec);
                        self.avg_loss = Some(self.sum_loss / period_dec);
                    }
                }
                Some(prev_ag) => {
                    // Wilder's smoothing
                    let period_dec = Decimal::from(self.len);
                    let prev_al = self.avg_loss.unwrap_or(Decimal::ZERO);
                    self.avg_gain =
                        Some((prev_ag * (period_dec - Decimal::ONE) + gain) / period_dec);
                    self.avg_loss =
                        Some((prev_al * (period_dec - Decimal::ONE) + loss) / period_dec);
                }
            }
        }

        self.prev_value = Some(value);
        self.value()
    }

    fn reset(&mut self) {
        self.prev_value = None;
        self.sum_gain = Decimal::ZERO;
        self.sum_loss = Decimal::ZERO;
        self.avg_gain = None;
        self.avg_loss = None;
        self.count = 0;
    }

    fn period(&self) -> usize {
        self.len + 1 // need one extra data point for the first change
    }

    fn is_ready(&self) -> bool {
        self.avg_gain.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_not_ready_before_seed_window() {
        let mut rsi = Rsi::new(3);
        assert_eq!(rsi.next(dec!(10)), None);
        assert_eq!(rsi.next(dec!(11)), None);
        assert_eq!(rsi.next(dec!(12)), None);
        // fourth value closes the third delta => first reading
        assert!(rsi.next(dec!(13)).is_some());
    }

    #[test]
    fn test_rsi_monotonic_rise_is_100() {
        let mut rsi = Rsi::new(3);
        let mut result = None;
        for v in [dec!(10), dec!(11), dec!(12), dec!(13)] {
            result = rsi.next(v);
        }
        // zero average loss => 100 by convention
        assert_eq!(result, Some(dec!(100)));
    }

    #[test]
    fn test_rsi_monotonic_fall_is_0() {
        let mut rsi = Rsi::new(3);
        let mut result = None;
        for v in [dec!(13), dec!(12), dec!(11), dec!(10)] {
            result = rsi.next(v);
        }
        assert_eq!(result, Some(Decimal::ZERO));
    }

    #[test]
    fn test_rsi_stays_in_bounds() {
        let mut rsi = Rsi::new(14);
        let values = [
            dec!(44), dec!(44.34), dec!(44.09), dec!(43.61), dec!(44.33),
            dec!(44.83), dec!(45.10), dec!(45.42), dec!(45.84), dec!(46.08),
            dec!(45.89), dec!(46.03), dec!(45.61), dec!(46.28), dec!(46.28),
            dec!(46.00), dec!(46.03), dec!(46.41), dec!(46.22), dec!(45.64),
        ];
        for v in &values {
            if let Some(r) = rsi.next(*v) {
                assert!(r >= Decimal::ZERO && r <= dec!(100));
            }
        }
        assert!(rsi.is_ready());
    }

    #[test]
    fn test_rsi_wilder_smoothing_after_seed() {
        // period 2: deltas +2, -1 => avg gain 1, avg loss 0.5
        let mut rsi = Rsi::new(2);
        rsi.next(dec!(10));
        rsi.next(dec!(12));
        let seeded = rsi.next(dec!(11)).unwrap();
        // rs = 2 => rsi = 100 - 100/3
        assert_eq!(seeded, dec!(100) - dec!(100) / dec!(3));
        // next delta +3: g = (1*1 + 3)/2 = 2, l = (0.5*1 + 0)/2 = 0.25
        let smoothed = rsi.next(dec!(14)).unwrap();
        // rs = 8 => rsi = 100 - 100/9
        assert_eq!(smoothed, dec!(100) - dec!(100) / dec!(9));
    }
}
