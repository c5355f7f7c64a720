//! Simple return series and the presentation summary of a price series.

use super::bar::DailyBar;

/// return[0] = 0, return[i] = close[i] / close[i-1] - 1.
pub fn simple_returns(bars: &[DailyBar]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(bars.len());
    if bars.is_empty() {
        return returns;
    }
    returns.push(0.0);
    returns.extend(bars.windows(2).map(|w| w[1].close / w[0].close - 1.0));
    returns
}

/// Start/end prices and the period return of a series, for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub start_price: f64,
    pub end_price: f64,
    pub period_return_pct: f64,
}

impl PriceSummary {
    pub fn from_bars(bars: &[DailyBar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;
        Some(Self {
            start_price: first.close,
            end_price: last.close,
            period_return_pct: (last.close / first.close - 1.0) * 100.0,
        })
    }
}
