//! Configuration structures.

use serde::{Deserialize, Serialize};
use trading_backtest::BacktestConfig;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-backtester".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Backtest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_capital: f64,
    pub slippage: f64,
    pub latency: f64,
    pub risk_free_rate: f64,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        let defaults = BacktestConfig::default();
        Self {
            initial_capital: defaults.initial_capital,
            slippage: defaults.slippage,
            latency: defaults.latency,
            risk_free_rate: defaults.risk_free_rate,
        }
    }
}

impl From<&BacktestSettings> for BacktestConfig {
    fn from(settings: &BacktestSettings) -> Self {
        BacktestConfig {
            initial_capital: settings.initial_capital,
            slippage: settings.slippage,
            latency: settings.latency,
            risk_free_rate: settings.risk_free_rate,
        }
    }
}
