//! Backtest command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use trading_backtest::{BacktestConfig, BacktestEngine, BacktestReport};
use trading_config::AppConfig;
use trading_data::CsvSignalSource;

use crate::cli::{BacktestArgs, OutputFormat};

pub fn run(args: BacktestArgs, config: &AppConfig) -> Result<()> {
    let engine = BacktestEngine::new(engine_config(&args, config))
        .context("Invalid backtest parameters")?;
    info!(
        signals = %args.signals.display(),
        capital = engine.config().initial_capital,
        slippage = engine.config().slippage,
        latency = engine.config().latency,
        "Starting backtest"
    );

    // Load data
    let loaded = CsvSignalSource::new(&args.signals)
        .load_signals()
        .with_context(|| format!("Failed to load signals from {}", args.signals.display()))?;
    if loaded.skipped_rows > 0 {
        info!(skipped = loaded.skipped_rows, "Some signal rows were malformed and skipped");
    }

    // Run backtest
    let report = engine.run(&loaded.observations);

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    write_outputs(&args, &report)
}

/// CLI flags win over the configuration file.
fn engine_config(args: &BacktestArgs, config: &AppConfig) -> BacktestConfig {
    let mut backtest_config = BacktestConfig::from(&config.backtest);
    if let Some(capital) = args.capital {
        backtest_config = backtest_config.with_capital(capital);
    }
    if let Some(slippage) = args.slippage {
        backtest_config = backtest_config.with_slippage(slippage);
    }
    if let Some(latency) = args.latency {
        backtest_config = backtest_config.with_latency(latency);
    }
    if let Some(rate) = args.risk_free_rate {
        backtest_config = backtest_config.with_risk_free_rate(rate);
    }
    backtest_config
}

fn write_outputs(args: &BacktestArgs, report: &BacktestReport) -> Result<()> {
    if let Some(save_path) = &args.save {
        write_file(save_path, &report.to_json()?)?;
        info!("Results saved to {:?}", save_path);
    }
    if let Some(path) = &args.equity_csv {
        write_file(path, &report.equity_to_csv()?)?;
        info!("Equity curve saved to {:?}", path);
    }
    if let Some(path) = &args.trades_csv {
        write_file(path, &report.trades_to_csv()?)?;
        info!("Trades saved to {:?}", path);
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
