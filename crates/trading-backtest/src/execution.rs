//! Fill price model.

use trading_core::types::{Observation, TradeAction};

use crate::BacktestConfig;

/// Determines the price a market order actually fills at.
///
/// The base price is the raw price `latency_steps` rows after the signal,
/// clamped to the last row. Slippage then moves it against the trader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionModel {
    slippage: f64,
    latency_steps: usize,
}

impl ExecutionModel {
    pub fn new(slippage: f64, latency_steps: usize) -> Self {
        Self {
            slippage,
            latency_steps,
        }
    }

    pub fn from_config(config: &BacktestConfig) -> Self {
        Self::new(config.slippage, config.latency_steps())
    }

    /// Raw price used as the execution base for a signal at `index`.
    pub fn base_price(&self, observations: &[Observation], index: usize) -> f64 {
        let last = observations.len().saturating_sub(1);
        let target = index.saturating_add(self.latency_steps).min(last);
        observations[target].price
    }

    /// Buy price with slippage applied (higher).
    #[inline]
    pub fn buy_price(&self, base: f64) -> f64 {
        base * (1.0 + self.slippage)
    }

    /// Sell price with slippage applied (lower).
    #[inline]
    pub fn sell_price(&self, base: f64) -> f64 {
        base * (1.0 - self.slippage)
    }

    /// Effective fill price for an order of the given direction.
    pub fn fill_price(&self, observations: &[Observation], index: usize, action: TradeAction) -> f64 {
        let base = self.base_price(observations, index);
        match action {
            TradeAction::Buy => self.buy_price(base),
            TradeAction::Sell => self.sell_price(base),
        }
    }
}
