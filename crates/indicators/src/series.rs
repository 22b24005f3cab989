//! Batch helpers producing indicator series aligned 1:1 with the input.
//!
//! Each call recomputes the whole series from scratch and returns a fresh
//! value; nothing is cached between calls.

use crate::ema::Ema;
use crate::rsi::Rsi;
use crate::{Indicator, IndicatorError};
use rust_decimal::Decimal;

fn check_args(closes: &[Decimal], period: usize, name: &str) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidInput(format!(
            "{name} period must be > 0"
        )));
    }
    if closes.is_empty() {
        return Err(IndicatorError::InvalidInput(format!(
            "{name} requires a non-empty close series"
        )));
    }
    Ok(())
}

/// EMA over a close series. Output has the same length as the input;
/// `out[0]` equals `closes[0]` (seed-at-first-value).
pub fn ema_series(closes: &[Decimal], period: usize) -> Result<Vec<Decimal>, IndicatorError> {
    check_args(closes, period, "EMA")?;

    let mut ema = Ema::new(period);
    let mut out = Vec::with_capacity(closes.len());
    for close in closes {
        // ready from the first input onward
        let value = ema
            .next(*close)
            .ok_or_else(|| IndicatorError::InvalidInput("EMA produced no value".into()))?;
        out.push(value);
    }
    Ok(out)
}

/// RSI over a close series. Output has the same length as the input;
/// indices before the seed window closes carry `None`, never zero.
pub fn rsi_series(
    closes: &[Decimal],
    period: usize,
) -> Result<Vec<Option<Decimal>>, IndicatorError> {
    check_args(closes, period, "RSI")?;

    let mut rsi = Rsi::new(period);
    Ok(closes.iter().map(|close| rsi.next(*close)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ema_series_reference_fixture() {
        let closes = [dec!(100), dec!(102), dec!(101), dec!(105), dec!(107)];
        let ema = ema_series(&closes, 3).unwrap();
        assert_eq!(
            ema,
            vec![dec!(100), dec!(101), dec!(101), dec!(103), dec!(105)]
        );
    }

    #[test]
    fn test_ema_series_period_one_is_identity() {
        let closes = [dec!(3), dec!(9.5), dec!(1), dec!(42)];
        let ema = ema_series(&closes, 1).unwrap();
        assert_eq!(ema, closes.to_vec());
    }

    #[test]
    fn test_ema_series_constant_input() {
        let closes = vec![dec!(50); 30];
        let ema = ema_series(&closes, 9).unwrap();
        assert_eq!(ema, closes);
    }

    #[test]
    fn test_ema_series_rejects_empty_input() {
        assert!(matches!(
            ema_series(&[], 9),
            Err(IndicatorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ema_series_rejects_zero_period() {
        assert!(ema_series(&[dec!(1)], 0).is_err());
    }

    #[test]
    fn test_rsi_series_alignment_and_leading_none() {
        let closes = [dec!(10), dec!(11), dec!(12), dec!(13), dec!(12)];
        let rsi = rsi_series(&closes, 3).unwrap();
        assert_eq!(rsi.len(), closes.len());
        assert_eq!(&rsi[..3], &[None, None, None]);
        // strictly rising seed window => zero average loss => 100
        assert_eq!(rsi[3], Some(dec!(100)));
        assert!(rsi[4].is_some());
    }

    #[test]
    fn test_rsi_series_bounds() {
        let closes = [
            dec!(44), dec!(44.34), dec!(44.09), dec!(43.61), dec!(44.33),
            dec!(44.83), dec!(45.10), dec!(45.42), dec!(45.84), dec!(46.08),
            dec!(45.89), dec!(46.03), dec!(45.61), dec!(46.28), dec!(46.28),
            dec!(46.00), dec!(46.03), dec!(46.41), dec!(46.22), dec!(45.64),
        ];
        for value in rsi_series(&closes, 14).unwrap().into_iter().flatten() {
            assert!(value >= Decimal::ZERO && value <= dec!(100));
        }
    }

    #[test]
    fn test_rsi_series_short_input_is_all_none() {
        let closes = [dec!(10), dec!(11)];
        let rsi = rsi_series(&closes, 14).unwrap();
        assert_eq!(rsi, vec![None, None]);
    }

    #[test]
    fn test_rsi_series_rejects_empty_input() {
        assert!(rsi_series(&[], 14).is_err());
    }
}
