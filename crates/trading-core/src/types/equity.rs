//! Equity curve points.

use serde::{Deserialize, Serialize};

/// Portfolio value at one observation, after any trade at that step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: String,
    pub equity: f64,
}

impl EquityPoint {
    pub fn new(timestamp: impl Into<String>, equity: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            equity,
        }
    }
}

/// Extract the raw equity values from a curve.
pub fn equity_values(curve: &[EquityPoint]) -> Vec<f64> {
    curve.iter().map(|p| p.equity).collect()
}

/// Simple per-step returns of an equity curve. The first point is measured
/// against `initial_capital`.
pub fn simple_returns(curve: &[EquityPoint], initial_capital: f64) -> Vec<f64> {
    let mut last = initial_capital;
    curve
        .iter()
        .map(|p| {
            let ret = if last != 0.0 { p.equity / last - 1.0 } else { 0.0 };
            last = p.equity;
            ret
        })
        .collect()
}
