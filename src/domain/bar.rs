//! Daily price bar representation.

use chrono::NaiveDate;

use super::error::DcalabError;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, close: f64) -> Self {
        Self { date, open, close }
    }

    /// close / open - 1
    pub fn intraday_return(&self) -> f64 {
        self.close / self.open - 1.0
    }
}

/// Checks the invariants every strategy relies on: at least one bar, positive
/// finite prices and strictly increasing dates.
pub fn validate_bars(bars: &[DailyBar]) -> Result<(), DcalabError> {
    if bars.is_empty() {
        return Err(DcalabError::invalid("empty bar sequence"));
    }

    for (i, bar) in bars.iter().enumerate() {
        if !(bar.open.is_finite() && bar.open > 0.0) {
            return Err(DcalabError::invalid(format!(
                "non-positive open {} on {}",
                bar.open, bar.date
            )));
        }
        if !(bar.close.is_finite() && bar.close > 0.0) {
            return Err(DcalabError::invalid(format!(
                "non-positive close {} on {}",
                bar.close, bar.date
            )));
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(DcalabError::invalid(format!(
                "dates not strictly increasing at {} (after {})",
                bar.date,
                bars[i - 1].date
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn intraday_return() {
        let bar = DailyBar::new(d(2), 100.0, 102.0);
        assert!((bar.intraday_return() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn valid_sequence_passes() {
        let bars = vec![DailyBar::new(d(2), 10.0, 11.0), DailyBar::new(d(3), 11.0, 12.0)];
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn empty_sequence_rejected() {
        let err = validate_bars(&[]).unwrap_err();
        assert!(matches!(err, DcalabError::InvalidInput { .. }));
    }

    #[test]
    fn zero_close_rejected() {
        let bars = vec![DailyBar::new(d(2), 10.0, 0.0)];
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn negative_open_rejected() {
        let bars = vec![DailyBar::new(d(2), -1.0, 10.0)];
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn nan_close_rejected() {
        let bars = vec![DailyBar::new(d(2), 10.0, f64::NAN)];
        assert!(validate_bars(&bars).is_err());
    }

    #[test]
    fn duplicate_dates_rejected() {
        let bars = vec![DailyBar::new(d(2), 10.0, 11.0), DailyBar::new(d(2), 11.0, 12.0)];
        let err = validate_bars(&bars).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn out_of_order_dates_rejected() {
        let bars = vec![DailyBar::new(d(5), 10.0, 11.0), DailyBar::new(d(3), 11.0, 12.0)];
        assert!(validate_bars(&bars).is_err());
    }
}
