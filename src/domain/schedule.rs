//! Periodic contribution schedule.
//!
//! Index 0 always receives the deposit (the initial contribution); after that
//! every `period`-th session does.

use super::error::DcalabError;

pub const DEFAULT_DEPOSIT_PERIOD: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSchedule {
    pub amounts: Vec<f64>,
    pub deposit: f64,
    pub period: usize,
}

impl ContributionSchedule {
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn deposit_count(&self) -> usize {
        deposit_count(self.amounts.len(), self.period)
    }

    /// deposit * (1 + floor((n - 1) / period))
    pub fn total(&self) -> f64 {
        self.deposit * self.deposit_count() as f64
    }
}

pub fn build_schedule(
    n: usize,
    deposit: f64,
    period: usize,
) -> Result<ContributionSchedule, DcalabError> {
    if n == 0 {
        return Err(DcalabError::invalid("schedule length must be at least 1"));
    }
    if period == 0 {
        return Err(DcalabError::invalid("deposit period must be at least 1"));
    }
    if !(deposit.is_finite() && deposit > 0.0) {
        return Err(DcalabError::invalid(format!(
            "deposit must be positive, got {deposit}"
        )));
    }

    let amounts = (0..n)
        .map(|i| if i % period == 0 { deposit } else { 0.0 })
        .collect();

    Ok(ContributionSchedule {
        amounts,
        deposit,
        period,
    })
}

/// Total a schedule of `n` sessions would deposit, without building it.
pub fn planned_total(n: usize, deposit: f64, period: usize) -> f64 {
    deposit * deposit_count(n, period) as f64
}

fn deposit_count(n: usize, period: usize) -> usize {
    if n == 0 || period == 0 {
        0
    } else {
        1 + (n - 1) / period
    }
}
