//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signal-backtester")]
#[command(author, version, about = "Long/flat signal backtesting engine")]
pub struct Cli {
    /// Configuration file path (defaults are used if it does not exist)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a signal file and report performance
    Backtest(BacktestArgs),
    /// Compute statistics for an existing equity curve
    Analyze(AnalyzeArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Signal file (CSV: timestamp,price,signal with a header line)
    #[arg(short, long)]
    pub signals: PathBuf,

    /// Initial capital
    #[arg(long)]
    pub capital: Option<f64>,

    /// Slippage fraction (0.0005 = 0.05%)
    #[arg(long)]
    pub slippage: Option<f64>,

    /// Execution latency in time units (0.1 per row)
    #[arg(long)]
    pub latency: Option<f64>,

    /// Annual risk-free rate
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the full JSON report to file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the equity curve as CSV
    #[arg(long)]
    pub equity_csv: Option<PathBuf>,

    /// Write the trade list as CSV
    #[arg(long)]
    pub trades_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Equity curve (CSV: timestamp,equity with a header line)
    #[arg(short, long)]
    pub equity: PathBuf,

    /// Initial capital the curve started from
    #[arg(long)]
    pub capital: Option<f64>,

    /// Annual risk-free rate
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
