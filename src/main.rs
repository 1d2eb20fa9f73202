//! Signal backtester CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use trading_config::load_config_or_default;
use trading_monitor::{setup_logging, setup_logging_with_file};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => config.logging.level.clone(),
    };
    let json_logs = cli.json_logs || config.logging.is_json();
    let _guard = match &config.logging.file {
        Some(file) => Some(setup_logging_with_file(&log_level, json_logs, Path::new(file))),
        None => {
            setup_logging(&log_level, json_logs);
            None
        }
    };

    // Execute command
    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, &config),
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}
