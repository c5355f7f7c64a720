//! Investment strategies and their results.
//!
//! Every strategy borrows the bar slice and builds its own aligned vectors
//! (returns, contributions, positions, values); nothing is written back.

pub mod buy_and_hold;
pub mod dca;
pub mod trend_dca;

pub use buy_and_hold::buy_and_hold;
pub use dca::{DcaResult, dca};
pub use trend_dca::{TrendDcaResult, TrendRow, trend_dca};

use chrono::NaiveDate;

use super::bar::DailyBar;
use super::error::DcalabError;

#[derive(Debug, Clone, PartialEq)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Outcome of one strategy on one instrument.
///
/// `final_value` and `gain_pct` are rounded to two decimals; `series` is not.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub final_value: f64,
    pub gain_pct: f64,
    pub series: Vec<ValuePoint>,
}

impl StrategyResult {
    pub(crate) fn from_values(bars: &[DailyBar], values: Vec<f64>, total_investment: f64) -> Self {
        let last = values.last().copied().unwrap_or(0.0);
        let series = bars
            .iter()
            .zip(values)
            .map(|(bar, value)| ValuePoint {
                date: bar.date,
                value,
            })
            .collect();

        Self {
            final_value: round2(last),
            gain_pct: round2(gain_pct(last, total_investment)),
            series,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.series.iter().map(|p| p.value).collect()
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// (final / invested - 1) * 100
pub fn gain_pct(final_value: f64, invested: f64) -> f64 {
    (final_value / invested - 1.0) * 100.0
}

pub(crate) fn validate_amount(name: &str, amount: f64) -> Result<(), DcalabError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(DcalabError::invalid(format!(
            "{name} must be positive, got {amount}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round2(123.454), 123.45);
        assert_eq!(round2(-1.005_1), -1.01);
    }

    #[test]
    fn gain_pct_basic() {
        assert!((gain_pct(150.0, 100.0) - 50.0).abs() < 1e-9);
        assert!((gain_pct(80.0, 100.0) + 20.0).abs() < 1e-9);
    }

    #[test]
    fn validate_amount_rejects_zero_and_nan() {
        assert!(validate_amount("deposit", 0.0).is_err());
        assert!(validate_amount("deposit", f64::NAN).is_err());
        assert!(validate_amount("deposit", 1.0).is_ok());
    }

    #[test]
    fn result_series_aligns_with_bars() {
        let bars = vec![
            DailyBar::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0, 10.0),
            DailyBar::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 10.0, 11.0),
        ];
        let result = StrategyResult::from_values(&bars, vec![100.0, 110.123], 100.0);
        assert_eq!(result.series.len(), 2);
        assert_eq!(result.series[1].date, bars[1].date);
        assert_eq!(result.final_value, 110.12);
        assert_eq!(result.gain_pct, 10.12);
        assert_eq!(result.values(), vec![100.0, 110.123]);
    }
}
