//! Study parameters and the per-instrument run of all three strategies.

use chrono::NaiveDate;

use super::bar::DailyBar;
use super::error::DcalabError;
use super::returns::PriceSummary;
use super::schedule::{DEFAULT_DEPOSIT_PERIOD, planned_total};
use super::strategy::{DcaResult, StrategyResult, TrendDcaResult, buy_and_hold, dca, trend_dca};
use super::trend::TrendConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub deposit: f64,
    pub deposit_period: usize,
    /// Declared total investment. When `None` it is taken from the deposit
    /// schedule for each instrument's bar count.
    pub total_investment: Option<f64>,
    pub trend: TrendConfig,
}

impl StudyConfig {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, deposit: f64) -> Self {
        Self {
            start_date,
            end_date,
            deposit,
            deposit_period: DEFAULT_DEPOSIT_PERIOD,
            total_investment: None,
            trend: TrendConfig::default(),
        }
    }

    pub fn total_investment_for(&self, bar_count: usize) -> f64 {
        self.total_investment
            .unwrap_or_else(|| planned_total(bar_count, self.deposit, self.deposit_period))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudyReport {
    pub code: String,
    pub bar_count: usize,
    pub summary: PriceSummary,
    pub total_investment: f64,
    pub buy_and_hold: StrategyResult,
    pub dca: DcaResult,
    pub trend: TrendDcaResult,
}

pub fn run_study(
    code: &str,
    bars: &[DailyBar],
    config: &StudyConfig,
) -> Result<StudyReport, DcalabError> {
    let summary = PriceSummary::from_bars(bars).ok_or_else(|| DcalabError::NoData {
        code: code.to_string(),
    })?;
    let total_investment = config.total_investment_for(bars.len());

    let buy_and_hold = buy_and_hold(bars, total_investment)?;
    let dca = dca(bars, config.deposit, total_investment, config.deposit_period)?;
    let trend = trend_dca(
        bars,
        config.deposit,
        total_investment,
        config.deposit_period,
        &config.trend,
    )?;

    Ok(StudyReport {
        code: code.to_string(),
        bar_count: bars.len(),
        summary,
        total_investment,
        buy_and_hold,
        dca,
        trend,
    })
}
