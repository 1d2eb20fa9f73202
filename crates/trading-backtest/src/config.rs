//! Backtest parameters.

use serde::{Deserialize, Serialize};
use trading_core::error::{BacktestError, BacktestResult};

/// Rows assumed to elapse per unit of latency.
pub const ROWS_PER_LATENCY_UNIT: f64 = 10.0;

/// Backtest configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Initial capital
    pub initial_capital: f64,
    /// Slippage fraction (0.0005 = 0.05%)
    pub slippage: f64,
    /// Execution latency in time units
    pub latency: f64,
    /// Annual risk-free rate (0.02 = 2%)
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            slippage: 0.0005,
            latency: 0.0,
            risk_free_rate: 0.0,
        }
    }
}

impl BacktestConfig {
    /// Set initial capital.
    pub fn with_capital(mut self, initial_capital: f64) -> Self {
        self.initial_capital = initial_capital;
        self
    }

    /// Set slippage fraction.
    pub fn with_slippage(mut self, slippage: f64) -> Self {
        self.slippage = slippage;
        self
    }

    /// Set latency.
    pub fn with_latency(mut self, latency: f64) -> Self {
        self.latency = latency;
        self
    }

    /// Set annual risk-free rate.
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Number of rows to look ahead for the execution price.
    ///
    /// Latency is approximated as a row offset assuming a uniform cadence of
    /// 0.1 time units per row; actual timestamps are not consulted.
    pub fn latency_steps(&self) -> usize {
        if self.latency > 0.0 {
            (self.latency * ROWS_PER_LATENCY_UNIT).floor() as usize
        } else {
            0
        }
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> BacktestResult<()> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(BacktestError::InvalidParameter(format!(
                "initial capital must be positive, got {}",
                self.initial_capital
            )));
        }
        if !self.slippage.is_finite() || !(0.0..1.0).contains(&self.slippage) {
            return Err(BacktestError::InvalidParameter(format!(
                "slippage must be in [0, 1), got {}",
                self.slippage
            )));
        }
        if !self.latency.is_finite() || self.latency < 0.0 {
            return Err(BacktestError::InvalidParameter(format!(
                "latency must be non-negative, got {}",
                self.latency
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(BacktestError::InvalidParameter(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}
