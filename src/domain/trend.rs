//! Trend-following position state machine.
//!
//! Two states, OUT and IN, starting OUT. On each bar:
//! - exit  = close < SMA_fast
//! - entry = SMA_fast > SMA_slow and close > SMA_fast
//!
//! Exit beats entry; with neither signal the previous state carries forward.
//! Undefined averages (warmup) produce no signal. The traded position lags the
//! signal by one bar: position[0] = OUT, position[i] = raw_state[i-1].

use super::bar::DailyBar;
use super::error::DcalabError;
use super::indicator::IndicatorSeries;
use super::indicator::sma::calculate_sma;

pub const DEFAULT_FAST_WINDOW: usize = 100;
pub const DEFAULT_SLOW_WINDOW: usize = 200;
pub const DEFAULT_SPREAD_COST: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketState {
    #[default]
    Out,
    In,
}

impl MarketState {
    /// 0.0 when out of the market, 1.0 when in.
    pub fn exposure(self) -> f64 {
        match self {
            MarketState::Out => 0.0,
            MarketState::In => 1.0,
        }
    }

    pub fn is_in(self) -> bool {
        self == MarketState::In
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    pub fast_window: usize,
    pub slow_window: usize,
    /// Fraction deducted from the return of the bar a position is entered on.
    pub spread_cost: f64,
    /// Fail with `InsufficientHistory` instead of treating warmup bars as OUT.
    pub require_full_history: bool,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            spread_cost: DEFAULT_SPREAD_COST,
            require_full_history: false,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> Result<(), DcalabError> {
        if self.fast_window == 0 {
            return Err(DcalabError::invalid("fast window must be at least 1"));
        }
        if self.slow_window <= self.fast_window {
            return Err(DcalabError::invalid(format!(
                "slow window {} must be longer than fast window {}",
                self.slow_window, self.fast_window
            )));
        }
        if !(self.spread_cost.is_finite() && (0.0..1.0).contains(&self.spread_cost)) {
            return Err(DcalabError::invalid(format!(
                "spread cost must be in [0, 1), got {}",
                self.spread_cost
            )));
        }
        Ok(())
    }

    /// True when `bar_count` bars give the slow average a defined value by
    /// the last bar.
    pub fn has_full_history(&self, bar_count: usize) -> bool {
        bar_count >= self.slow_window
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSignals {
    pub sma_fast: IndicatorSeries,
    pub sma_slow: IndicatorSeries,
    pub raw_state: Vec<MarketState>,
    pub position: Vec<MarketState>,
}

impl TrendSignals {
    /// Indices where the traded position switches OUT -> IN.
    pub fn entry_indices(&self) -> Vec<usize> {
        (1..self.position.len())
            .filter(|&i| is_fresh_entry(&self.position, i))
            .collect()
    }
}

/// Transition rule for one bar.
pub fn next_state(prev: MarketState, entry: bool, exit: bool) -> MarketState {
    if exit {
        MarketState::Out
    } else if entry {
        MarketState::In
    } else {
        prev
    }
}

pub fn derive_signals(bars: &[DailyBar], config: &TrendConfig) -> Result<TrendSignals, DcalabError> {
    config.validate()?;
    if config.require_full_history && !config.has_full_history(bars.len()) {
        return Err(DcalabError::InsufficientHistory {
            bars: bars.len(),
            minimum: config.slow_window,
        });
    }

    let sma_fast = calculate_sma(bars, config.fast_window);
    let sma_slow = calculate_sma(bars, config.slow_window);

    let mut raw_state = Vec::with_capacity(bars.len());
    let mut state = MarketState::Out;

    for (i, bar) in bars.iter().enumerate() {
        let fast = sma_fast.value_at(i);
        let slow = sma_slow.value_at(i);

        let exit = fast.is_some_and(|f| bar.close < f);
        let entry = match (fast, slow) {
            (Some(f), Some(s)) => f > s && bar.close > f,
            _ => false,
        };

        state = next_state(state, entry, exit);
        raw_state.push(state);
    }

    let position = lag_one_bar(&raw_state);

    Ok(TrendSignals {
        sma_fast,
        sma_slow,
        raw_state,
        position,
    })
}

/// position[0] = OUT, position[i] = raw_state[i-1].
pub fn lag_one_bar(raw_state: &[MarketState]) -> Vec<MarketState> {
    let mut position = Vec::with_capacity(raw_state.len());
    if raw_state.is_empty() {
        return position;
    }
    position.push(MarketState::Out);
    position.extend_from_slice(&raw_state[..raw_state.len() - 1]);
    position
}

/// Return actually applied to capital on each bar.
///
/// A fresh entry trades from the open, so it earns close/open - 1 less the
/// spread. Holding bars earn the close-to-close return; OUT bars earn nothing.
pub fn effective_returns(
    bars: &[DailyBar],
    raw_returns: &[f64],
    position: &[MarketState],
    spread_cost: f64,
) -> Result<Vec<f64>, DcalabError> {
    if bars.len() != raw_returns.len() || bars.len() != position.len() {
        return Err(DcalabError::invalid(format!(
            "misaligned series: {} bars, {} returns, {} positions",
            bars.len(),
            raw_returns.len(),
            position.len()
        )));
    }

    Ok((0..bars.len())
        .map(|i| {
            if is_fresh_entry(position, i) {
                bars[i].intraday_return() - spread_cost
            } else {
                position[i].exposure() * raw_returns[i]
            }
        })
        .collect())
}

fn is_fresh_entry(position: &[MarketState], i: usize) -> bool {
    i > 0 && position[i].is_in() && !position[i - 1].is_in()
}
