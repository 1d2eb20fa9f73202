//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Environment variable prefix, e.g. `BACKTEST__BACKTEST__SLIPPAGE=0.001`.
const ENV_PREFIX: &str = "BACKTEST";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, true)
}

/// Load configuration, falling back to defaults when the file is absent.
/// Environment overrides still apply.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, false)
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

/// Render a configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

fn build(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
