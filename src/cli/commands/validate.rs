//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use trading_backtest::BacktestConfig;
use trading_config::{load_config, to_toml};

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let backtest = BacktestConfig::from(&config.backtest);
    if let Err(e) = backtest.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Initial capital: {}", backtest.initial_capital);
    println!("Slippage: {}", backtest.slippage);
    println!("Latency: {} ({} rows)", backtest.latency, backtest.latency_steps());
    println!("Risk-free rate: {}", backtest.risk_free_rate);
    println!();
    println!("Effective configuration:");
    println!("{}", to_toml(&config)?);

    Ok(())
}
