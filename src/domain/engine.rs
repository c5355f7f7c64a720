//! Cumulative value engine.
//!
//! value[0] = contributions[0]
//! value[i] = value[i-1] * (1 + r[i]) + (contributions[i] if recurring)
//!
//! Negative values are carried through unchanged.

use super::error::DcalabError;

pub fn compute_cumulative_value(
    effective_returns: &[f64],
    contributions: &[f64],
    recurring: bool,
) -> Result<Vec<f64>, DcalabError> {
    if effective_returns.is_empty() {
        return Err(DcalabError::invalid("empty return series"));
    }
    if effective_returns.len() != contributions.len() {
        return Err(DcalabError::invalid(format!(
            "return series has {} entries but contribution series has {}",
            effective_returns.len(),
            contributions.len()
        )));
    }

    let mut values = Vec::with_capacity(contributions.len());
    let mut value = contributions[0];
    values.push(value);

    for (r, c) in effective_returns.iter().zip(contributions).skip(1) {
        value *= 1.0 + r;
        if recurring {
            value += c;
        }
        values.push(value);
    }

    Ok(values)
}

/// investment * prod(1 + r[0..=i]) for every i.
pub fn compound_lump_sum(effective_returns: &[f64], investment: f64) -> Vec<f64> {
    effective_returns
        .iter()
        .scan(1.0_f64, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth * investment)
        })
        .collect()
}
