#![allow(dead_code)]

use chrono::NaiveDate;
pub use dcalab::domain::bar::DailyBar;
use dcalab::domain::error::DcalabError;
use dcalab::domain::study::StudyConfig;
use dcalab::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<DailyBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<DailyBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, DcalabError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(DcalabError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, DcalabError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcalabError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(DcalabError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bars with open == close, one per calendar day from 2020-01-01.
pub fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
    let start = date(2020, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| DailyBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            close,
        })
        .collect()
}

/// Closes growing geometrically by `rate` per bar.
pub fn geometric_bars(count: usize, start_price: f64, rate: f64) -> Vec<DailyBar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| start_price * (1.0 + rate).powi(i as i32))
        .collect();
    bars_from_closes(&closes)
}

/// A deterministic zig-zag trend: rises for a while, falls, then rises again.
pub fn trending_bars(count: usize) -> Vec<DailyBar> {
    let start = date(2020, 1, 1);
    (0..count)
        .map(|i| {
            let t = i as f64;
            let trend = if i < count / 2 {
                100.0 + t * 0.5
            } else {
                100.0 + (count / 2) as f64 * 0.5 - (t - (count / 2) as f64) * 0.3
            };
            let wiggle = ((i % 7) as f64 - 3.0) * 0.4;
            let close = trend + wiggle;
            DailyBar {
                date: start + chrono::Duration::days(i as i64),
                open: close - 0.25,
                close,
            }
        })
        .collect()
}

pub fn sample_config() -> StudyConfig {
    StudyConfig::new(date(2020, 1, 1), date(2024, 12, 31), 100.0)
}
