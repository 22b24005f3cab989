//! Embedded sample dataset.
//!
//! Stands in for a live market-data feed: a handful of symbols with 40
//! daily bars each, generated from fixed per-symbol sawtooth walks. No
//! randomness anywhere, so repeated runs and tests see identical data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sigwatch_core::{Bar, BarSeries, Watchlist};

use crate::MemoryBarStore;

/// Bars per sample symbol; enough history for EMA(21) and RSI(14) to
/// settle.
pub const SAMPLE_BARS: usize = 40;

struct Profile {
    symbol: &'static str,
    start: Decimal,
    /// Gain applied on odd bars.
    rise: Decimal,
    /// Drop applied on even bars.
    dip: Decimal,
}

fn profiles() -> [Profile; 5] {
    [
        Profile {
            symbol: "AAPL",
            start: dec!(187),
            rise: dec!(1.5),
            dip: dec!(1),
        },
        Profile {
            symbol: "MSFT",
            start: dec!(402),
            rise: dec!(2.25),
            dip: dec!(1.75),
        },
        Profile {
            symbol: "NVDA",
            start: dec!(560),
            rise: dec!(6),
            dip: dec!(3.5),
        },
        Profile {
            symbol: "AMZN",
            start: dec!(171),
            rise: dec!(0.75),
            dip: dec!(1.25),
        },
        Profile {
            symbol: "META",
            start: dec!(390),
            rise: dec!(2),
            dip: dec!(2),
        },
    ]
}

fn build_series(profile: &Profile) -> BarSeries {
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid sample start date");
    let mut series = BarSeries::new();
    let mut close = profile.start;

    for i in 0..SAMPLE_BARS {
        let open = close;
        close = if i % 2 == 1 {
            close + profile.rise
        } else {
            close - profile.dip
        };
        let high = open.max(close) + dec!(0.5);
        let low = open.min(close) - dec!(0.5);
        let volume = Decimal::from(10_000 + (i * 733) % 4_000);

        series
            .push(Bar {
                date: start_date + chrono::Days::new(i as u64),
                open,
                high,
                low,
                close,
                volume,
            })
            .expect("sample bars are well-formed and date-ascending");
    }

    series
}

/// The sample watchlist; the first symbol is the anchor.
pub fn sample_watchlist() -> Watchlist {
    Watchlist::from_symbols(profiles().iter().map(|p| p.symbol))
}

/// A store holding the full sample dataset.
pub fn sample_store() -> MemoryBarStore {
    let mut store = MemoryBarStore::new();
    for profile in profiles() {
        store.insert_series(profile.symbol, build_series(&profile));
    }
    store
}
