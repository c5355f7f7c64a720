//! Trend-following overlay combined with DCA.
//!
//! The position state machine from [`crate::domain::trend`] turns raw returns
//! into effective returns. Two value series are built from them: a lump sum of
//! `total_investment` compounded on its own (TA only), and the periodic deposit
//! schedule run through the engine (DCA + TA).

use chrono::NaiveDate;

use super::dca::reconcile;
use super::{StrategyResult, validate_amount};
use crate::domain::bar::{DailyBar, validate_bars};
use crate::domain::engine::{compound_lump_sum, compute_cumulative_value};
use crate::domain::error::DcalabError;
use crate::domain::returns::simple_returns;
use crate::domain::schedule::build_schedule;
use crate::domain::trend::{MarketState, TrendConfig, TrendSignals, derive_signals, effective_returns};

/// One bar of the per-bar working table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub raw_state: MarketState,
    pub position: MarketState,
    pub contribution: f64,
    pub effective_return: f64,
    pub ta_value: f64,
    pub dca_ta_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendDcaResult {
    pub ta: StrategyResult,
    pub dca_ta: StrategyResult,
    pub total_deposited: f64,
    pub rows: Vec<TrendRow>,
}

impl TrendDcaResult {
    /// Number of OUT -> IN transitions, each of which paid the spread once.
    pub fn entry_count(&self) -> usize {
        self.rows
            .windows(2)
            .filter(|w| !w[0].position.is_in() && w[1].position.is_in())
            .count()
    }

    pub fn days_in_market(&self) -> usize {
        self.rows.iter().filter(|r| r.position.is_in()).count()
    }
}

pub fn trend_dca(
    bars: &[DailyBar],
    deposit: f64,
    total_investment: f64,
    period: usize,
    config: &TrendConfig,
) -> Result<TrendDcaResult, DcalabError> {
    validate_bars(bars)?;
    validate_amount("deposit", deposit)?;
    validate_amount("total investment", total_investment)?;

    let schedule = build_schedule(bars.len(), deposit, period)?;
    reconcile(total_investment, &schedule)?;

    let signals = derive_signals(bars, config)?;
    let raw_returns = simple_returns(bars);
    let effective = effective_returns(bars, &raw_returns, &signals.position, config.spread_cost)?;

    let ta_values = compound_lump_sum(&effective, total_investment);
    let dca_ta_values = compute_cumulative_value(&effective, &schedule.amounts, true)?;

    let rows = build_rows(
        bars,
        &signals,
        &schedule.amounts,
        &effective,
        &ta_values,
        &dca_ta_values,
    );

    Ok(TrendDcaResult {
        ta: StrategyResult::from_values(bars, ta_values, total_investment),
        dca_ta: StrategyResult::from_values(bars, dca_ta_values, total_investment),
        total_deposited: schedule.total(),
        rows,
    })
}

fn build_rows(
    bars: &[DailyBar],
    signals: &TrendSignals,
    contributions: &[f64],
    effective: &[f64],
    ta_values: &[f64],
    dca_ta_values: &[f64],
) -> Vec<TrendRow> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| TrendRow {
            date: bar.date,
            open: bar.open,
            close: bar.close,
            sma_fast: signals.sma_fast.value_at(i),
            sma_slow: signals.sma_slow.value_at(i),
            raw_state: signals.raw_state[i],
            position: signals.position[i],
            contribution: contributions[i],
            effective_return: effective[i],
            ta_value: ta_values[i],
            dca_ta_value: dca_ta_values[i],
        })
        .collect()
}
