//! Backtest report generation.

use serde::{Deserialize, Serialize};
use trading_core::error::{BacktestError, BacktestResult};
use trading_core::types::{EquityPoint, Trade};

use crate::{BacktestConfig, PerformanceStats};

/// Number of trades listed in the text summary.
const SAMPLE_TRADES: usize = 5;

/// Complete backtest report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Configuration used
    pub config: BacktestConfig,
    /// Equity after the last observation
    pub final_equity: f64,
    /// Cash after the last observation
    pub final_cash: f64,
    /// Shares still held after the last observation
    pub final_position: u64,
    /// Statistics
    pub stats: PerformanceStats,
    /// All trades
    pub trades: Vec<Trade>,
    /// Equity curve
    pub equity_curve: Vec<EquityPoint>,
    /// Number of observations replayed
    pub observations_processed: usize,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Initial Capital:     ${:.2}\n",
            self.config.initial_capital
        ));
        s.push_str(&format!("  Final Equity:        ${:.2}\n", self.final_equity));
        s.push_str(&format!(
            "  Total Return:        {:.2}%\n",
            self.stats.total_return_pct
        ));
        s.push_str(&format!(
            "  Annualized Return:   {:.2}%\n",
            self.stats.annualized_return_pct
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {:.2}%\n",
            self.stats.max_drawdown_pct
        ));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Sharpe Ratio:        {:.2}\n", self.stats.sharpe_ratio));
        s.push_str(&format!("  Sortino Ratio:       {:.2}\n", self.stats.sortino_ratio));
        s.push('\n');

        s.push_str("EXECUTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Total Trades:        {}\n", self.stats.total_trades));
        s.push_str(&format!(
            "  Observations:        {}\n",
            self.observations_processed
        ));
        s.push_str(&format!("  Slippage:            {}\n", self.config.slippage));
        s.push_str(&format!("  Latency:             {}\n", self.config.latency));
        s.push('\n');

        if !self.trades.is_empty() {
            s.push_str("SAMPLE TRADES\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for trade in self.trades.iter().take(SAMPLE_TRADES) {
                s.push_str(&format!("  {}\n", trade));
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the equity curve as `timestamp,equity` CSV.
    pub fn equity_to_csv(&self) -> BacktestResult<String> {
        write_csv(&self.equity_curve)
    }

    /// Export trades as `timestamp,action,shares,price,value` CSV.
    pub fn trades_to_csv(&self) -> BacktestResult<String> {
        write_csv(&self.trades)
    }
}

fn write_csv<T: Serialize>(rows: &[T]) -> BacktestResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| BacktestError::Serialization(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BacktestError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BacktestError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trading_core::types::TradeAction;

    fn report() -> BacktestReport {
        let trades: Vec<Trade> = (0..7)
            .map(|i| {
                let action = if i % 2 == 0 {
                    TradeAction::Buy
                } else {
                    TradeAction::Sell
                };
                Trade::new(format!("t{}", i), action, 10, 100.0)
            })
            .collect();

        BacktestReport {
            config: BacktestConfig::default(),
            final_equity: 9000.0,
            final_cash: 9000.0,
            final_position: 0,
            stats: PerformanceStats {
                total_return_pct: -10.0,
                total_trades: trades.len(),
                ..PerformanceStats::default()
            },
            trades,
            equity_curve: vec![
                EquityPoint::new("t0", 10000.0),
                EquityPoint::new("t1", 9000.0),
            ],
            observations_processed: 2,
        }
    }

    #[test]
    fn test_summary_lists_at_most_five_trades() {
        let summary = report().summary();

        assert!(summary.contains("Final Equity:        $9000.00"));
        assert!(summary.contains("Total Return:        -10.00%"));
        assert!(summary.contains("Total Trades:        7"));
        assert!(summary.contains("t4: BUY 10 shares"));
        assert!(!summary.contains("t5: SELL"));
    }

    #[test]
    fn test_equity_csv() {
        let csv = report().equity_to_csv().unwrap();
        assert_eq!(csv, "timestamp,equity\nt0,10000.0\nt1,9000.0\n");
    }

    #[test]
    fn test_trades_csv_header() {
        let csv = report().trades_to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("timestamp,action,shares,price,value"));
        assert_eq!(lines.next(), Some("t0,BUY,10,100.0,1000.0"));
    }

    #[test]
    fn test_json_round_trip() {
        let original = report();
        let json = original.to_json().unwrap();
        let parsed: BacktestReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
