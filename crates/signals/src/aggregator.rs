use serde::{Deserialize, Serialize};
use sigwatch_core::{SentimentSnapshot, Signal};

/// Number of agreeing symbols needed before a portfolio-level action is
/// surfaced.
pub const PORTFOLIO_SIGNAL_THRESHOLD: usize = 3;

/// Portfolio-level recommendation derived from one sentiment snapshot.
///
/// The two flags are evaluated independently and may both be set: the
/// sell rule additionally requires the anchor symbol itself to be
/// selling, while the buy rule has no anchor condition. That asymmetry
/// is part of the established policy and is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRecommendation {
    pub show_buy: bool,
    pub show_sell: bool,
}

/// Apply the aggregation rule to a full snapshot. Recomputed wholesale
/// on every evaluation; there is no incremental counter maintenance.
pub fn aggregate(snapshot: &SentimentSnapshot) -> PortfolioRecommendation {
    let show_buy = snapshot.buy_count >= PORTFOLIO_SIGNAL_THRESHOLD;
    let show_sell = snapshot.anchor_signal == Some(Signal::Sell)
        && snapshot.sell_count >= PORTFOLIO_SIGNAL_THRESHOLD;

    PortfolioRecommendation {
        show_buy,
        show_sell,
    }
}
