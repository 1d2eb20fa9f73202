//! Backtesting engine.

use std::path::Path;
use tracing::info;
use trading_core::error::BacktestResult;
use trading_core::traits::SignalSource;
use trading_core::types::Observation;
use trading_data::CsvSignalSource;

use crate::report::BacktestReport;
use crate::simulator::Simulator;
use crate::statistics::PerformanceStats;
use crate::BacktestConfig;

/// Backtesting engine: simulate, then analyze.
///
/// Holds only validated parameters; every run gets its own ledger.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: BacktestConfig,
    simulator: Simulator,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> BacktestResult<Self> {
        config.validate()?;
        Ok(Self {
            simulator: Simulator::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run a backtest over already-loaded observations.
    pub fn run(&self, observations: &[Observation]) -> BacktestReport {
        let ledger = self.simulator.run(observations);

        let stats = PerformanceStats::compute(
            &ledger.equity_curve,
            &ledger.returns,
            self.config.initial_capital,
            self.config.risk_free_rate,
            ledger.trades.len(),
        );
        let final_equity = ledger
            .final_equity()
            .unwrap_or(self.config.initial_capital);

        info!(
            observations = observations.len(),
            trades = stats.total_trades,
            final_equity,
            total_return_pct = stats.total_return_pct,
            sharpe = stats.sharpe_ratio,
            "Backtest complete"
        );

        BacktestReport {
            config: self.config,
            final_equity,
            final_cash: ledger.final_cash,
            final_position: ledger.final_position,
            stats,
            trades: ledger.trades,
            equity_curve: ledger.equity_curve,
            observations_processed: observations.len(),
        }
    }

    /// Load observations from a source and run a backtest.
    pub fn run_source(&self, source: &dyn SignalSource) -> BacktestResult<BacktestReport> {
        info!(source = source.name(), "Loading signals");
        let observations = source.load()?;
        Ok(self.run(&observations))
    }
}

/// Run a complete backtest on a signal CSV file.
pub fn run_backtest(path: impl AsRef<Path>, config: BacktestConfig) -> BacktestResult<BacktestReport> {
    let engine = BacktestEngine::new(config)?;
    engine.run_source(&CsvSignalSource::new(path))
}
