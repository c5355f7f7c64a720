//! Buy-and-hold: one lump sum on the first bar, held to the end.

use super::{StrategyResult, validate_amount};
use crate::domain::bar::{DailyBar, validate_bars};
use crate::domain::engine::compute_cumulative_value;
use crate::domain::error::DcalabError;
use crate::domain::returns::simple_returns;

pub fn buy_and_hold(
    bars: &[DailyBar],
    total_investment: f64,
) -> Result<StrategyResult, DcalabError> {
    validate_bars(bars)?;
    validate_amount("total investment", total_investment)?;

    let returns = simple_returns(bars);
    let mut contributions = vec![0.0; bars.len()];
    contributions[0] = total_investment;

    let values = compute_cumulative_value(&returns, &contributions, false)?;
    Ok(StrategyResult::from_values(bars, values, total_investment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_bars(closes: &[f64]) -> Vec<DailyBar> {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar::new(start + chrono::Duration::days(i as i64), close, close))
            .collect()
    }

    #[test]
    fn final_value_tracks_price_ratio() {
        let bars = make_bars(&[100.0, 120.0, 90.0, 150.0]);
        let result = buy_and_hold(&bars, 1000.0).unwrap();
        assert_relative_eq!(result.series[3].value, 1500.0, epsilon = 1e-9);
        assert_eq!(result.final_value, 1500.0);
        assert_eq!(result.gain_pct, 50.0);
    }

    #[test]
    fn flat_prices_keep_value() {
        let bars = make_bars(&[42.0; 10]);
        let result = buy_and_hold(&bars, 500.0).unwrap();
        assert!(result.values().iter().all(|&v| v == 500.0));
        assert_eq!(result.gain_pct, 0.0);
    }

    #[test]
    fn single_bar() {
        let bars = make_bars(&[10.0]);
        let result = buy_and_hold(&bars, 100.0).unwrap();
        assert_eq!(result.values(), vec![100.0]);
    }

    #[test]
    fn empty_bars_rejected() {
        assert!(matches!(
            buy_and_hold(&[], 100.0),
            Err(DcalabError::InvalidInput { .. })
        ));
    }

    #[test]
    fn non_positive_investment_rejected() {
        let bars = make_bars(&[10.0, 11.0]);
        assert!(buy_and_hold(&bars, 0.0).is_err());
        assert!(buy_and_hold(&bars, -100.0).is_err());
    }
}
