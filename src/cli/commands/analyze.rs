//! Analyze command implementation.

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;
use trading_backtest::PerformanceStats;
use trading_config::AppConfig;
use trading_core::types::{simple_returns, EquityPoint};

use crate::cli::{AnalyzeArgs, OutputFormat};

pub fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let initial_capital = args.capital.unwrap_or(config.backtest.initial_capital);
    let risk_free_rate = args.risk_free_rate.unwrap_or(config.backtest.risk_free_rate);
    if !initial_capital.is_finite() || initial_capital <= 0.0 {
        bail!("Initial capital must be positive, got {}", initial_capital);
    }

    let equity = load_equity(&args.equity)?;
    info!(points = equity.len(), "Loaded equity curve");

    let returns = simple_returns(&equity, initial_capital);
    let stats = PerformanceStats::compute(&equity, &returns, initial_capital, risk_free_rate, 0);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Equity points:       {}", equity.len());
            println!("Total Return:        {:.2}%", stats.total_return_pct);
            println!("Annualized Return:   {:.2}%", stats.annualized_return_pct);
            println!("Max Drawdown:        {:.2}%", stats.max_drawdown_pct);
            println!("Sharpe Ratio:        {:.2}", stats.sharpe_ratio);
            println!("Sortino Ratio:       {:.2}", stats.sortino_ratio);
        }
    }

    Ok(())
}

/// Read a `timestamp,equity` CSV as written by `backtest --equity-csv`.
fn load_equity(path: &Path) -> Result<Vec<EquityPoint>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut equity = Vec::new();
    for result in reader.deserialize() {
        let point: EquityPoint =
            result.with_context(|| format!("Malformed equity row in {}", path.display()))?;
        equity.push(point);
    }

    if equity.is_empty() {
        bail!("No equity points in {}", path.display());
    }
    Ok(equity)
}
