//! Logging setup.

use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Setup logging with the given level.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

/// Setup logging to stderr and additionally to a log file.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn setup_logging_with_file(level: &str, json: bool, file: &Path) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let directory = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "backtest.log".into());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(file_layer(writer, true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .with(file_layer(writer, false))
            .init();
    }

    guard
}

/// Plain (no ANSI) layer writing to the log file.
fn file_layer<S>(writer: NonBlocking, json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    if json {
        fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .json()
            .boxed()
    } else {
        fmt::layer().with_ansi(false).with_writer(writer).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_event(json: bool) -> String {
        let dir = tempdir().unwrap();
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir.path(), "test.log"));

        let subscriber = tracing_subscriber::registry().with(file_layer(writer, json));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(trades = 2, "Backtest complete");
        });
        drop(guard);

        fs::read_to_string(dir.path().join("test.log")).unwrap()
    }

    #[test]
    fn test_file_layer_plain() {
        let contents = write_event(false);
        assert!(contents.contains("Backtest complete"));
        assert!(contents.contains("trades=2"));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn test_file_layer_json() {
        let contents = write_event(true);
        let line = contents.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["fields"]["message"], "Backtest complete");
        assert_eq!(value["fields"]["trades"], 2);
    }
}
