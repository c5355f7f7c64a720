//! Dollar-cost averaging: a fixed deposit every `period` sessions.

use super::{StrategyResult, validate_amount};
use crate::domain::bar::{DailyBar, validate_bars};
use crate::domain::engine::compute_cumulative_value;
use crate::domain::error::DcalabError;
use crate::domain::returns::simple_returns;
use crate::domain::schedule::{ContributionSchedule, build_schedule};

const RECONCILE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct DcaResult {
    pub result: StrategyResult,
    pub deposit: f64,
    pub total_deposited: f64,
    pub deposit_count: usize,
}

pub fn dca(
    bars: &[DailyBar],
    deposit: f64,
    total_investment: f64,
    period: usize,
) -> Result<DcaResult, DcalabError> {
    validate_bars(bars)?;
    validate_amount("deposit", deposit)?;
    validate_amount("total investment", total_investment)?;

    let schedule = build_schedule(bars.len(), deposit, period)?;
    reconcile(total_investment, &schedule)?;

    let returns = simple_returns(bars);
    let values = compute_cumulative_value(&returns, &schedule.amounts, true)?;

    Ok(DcaResult {
        result: StrategyResult::from_values(bars, values, total_investment),
        deposit,
        total_deposited: schedule.total(),
        deposit_count: schedule.deposit_count(),
    })
}

/// The declared total must equal what the schedule actually deposits,
/// otherwise gains would be measured against the wrong base.
pub fn reconcile(declared: f64, schedule: &ContributionSchedule) -> Result<(), DcalabError> {
    let deposited = schedule.total();
    if (declared - deposited).abs() > RECONCILE_TOLERANCE * declared.abs().max(1.0) {
        return Err(DcalabError::InvestmentMismatch {
            declared,
            deposited,
        });
    }
    Ok(())
}
