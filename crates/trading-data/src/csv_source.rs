//! CSV signal source.

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trading_core::error::DataError;
use trading_core::traits::SignalSource;
use trading_core::types::Observation;

/// Result of parsing a signal file.
#[derive(Debug, Clone, Default)]
pub struct LoadedSignals {
    /// Valid observations in file order
    pub observations: Vec<Observation>,
    /// Number of data rows dropped as malformed, blank lines included
    pub skipped_rows: usize,
}

/// Signal file reader.
///
/// Expects three comma-separated columns `timestamp,price,signal` after a
/// header line. The first physical line is always dropped, whatever it
/// contains. Quoting is not supported. Empty lines after the header count
/// as malformed rows.
pub struct CsvSignalSource {
    path: PathBuf,
    name: String,
}

impl CsvSignalSource {
    /// Create a new CSV signal source. The file is not touched until loaded.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Open and parse the file.
    pub fn load_signals(&self) -> Result<LoadedSignals, DataError> {
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let loaded = Self::load_from_reader(file)?;

        if loaded.observations.is_empty() {
            return Err(DataError::NoDataAvailable {
                source_name: self.name.clone(),
                skipped: loaded.skipped_rows,
            });
        }

        info!(
            source = %self.name,
            rows = loaded.observations.len(),
            skipped = loaded.skipped_rows,
            "Loaded signals"
        );
        Ok(loaded)
    }

    /// Parse signal rows from any reader. An empty result is not an error
    /// here; callers decide whether zero rows is fatal.
    pub fn load_from_reader<R: Read>(mut reader: R) -> Result<LoadedSignals, DataError> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|e| DataError::Csv(e.to_string()))?;

        // Header is the first physical line, whatever it holds
        let body: &[u8] = match input.iter().position(|&b| b == b'\n') {
            Some(end) => &input[end + 1..],
            None => &[],
        };

        // The csv reader drops empty lines without reporting them
        let mut loaded = LoadedSignals {
            observations: Vec::new(),
            skipped_rows: count_blank_lines(body),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(body);
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => match e.kind() {
                    ErrorKind::Utf8 { pos, .. } => {
                        let line = pos.as_ref().map(|p| p.line() + 1).unwrap_or(0);
                        warn!(line, "Skipping signal row with invalid UTF-8");
                        loaded.skipped_rows += 1;
                        continue;
                    }
                    _ => return Err(DataError::Csv(e.to_string())),
                },
            }

            match parse_row(&record) {
                Ok(observation) => loaded.observations.push(observation),
                Err(reason) => {
                    let line = record.position().map(|p| p.line() + 1).unwrap_or(0);
                    warn!(line, row = ?record, %reason, "Skipping malformed signal row");
                    loaded.skipped_rows += 1;
                }
            }
        }

        Ok(loaded)
    }
}

impl SignalSource for CsvSignalSource {
    fn load(&self) -> Result<Vec<Observation>, DataError> {
        self.load_signals().map(|loaded| loaded.observations)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Count empty lines in the data section, warning for each.
fn count_blank_lines(body: &[u8]) -> usize {
    if body.is_empty() {
        return 0;
    }
    let body = body.strip_suffix(b"\n").unwrap_or(body);

    body.split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| line.is_empty() || *line == b"\r")
        // +2: one for the header, one for 1-based numbering
        .inspect(|(index, _)| warn!(line = index + 2, "Skipping blank signal row"))
        .count()
}

/// Parse one data row into an observation.
fn parse_row(record: &StringRecord) -> Result<Observation, String> {
    if record.len() < 3 {
        return Err(format!("expected 3 fields, found {}", record.len()));
    }

    let timestamp = &record[0];
    let price = parse_price(&record[1])?;
    let signal = parse_signal(&record[2])?;

    Ok(Observation::new(timestamp, price, signal))
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .parse()
        .map_err(|_| format!("invalid price '{}'", raw))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(format!("price must be positive, got {}", raw));
    }
    Ok(price)
}

/// Signals are integers, but `1.0` style values written by float-typed
/// producers are accepted when integral.
fn parse_signal(raw: &str) -> Result<i32, String> {
    if let Ok(signal) = raw.parse::<i32>() {
        return Ok(signal);
    }

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => Ok(v as i32),
        _ => Err(format!("invalid signal '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn load(text: &str) -> LoadedSignals {
        CsvSignalSource::load_from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_valid_rows() {
        let loaded = load("timestamp,price,signal\n2024-01-01,100.5,1\n2024-01-02,101.0,0\n");

        assert_eq!(loaded.skipped_rows, 0);
        assert_eq!(
            loaded.observations,
            vec![
                Observation::new("2024-01-01", 100.5, 1),
                Observation::new("2024-01-02", 101.0, 0),
            ]
        );
    }

    #[test]
    fn test_header_always_dropped() {
        // First line looks like data but is still treated as the header
        let loaded = load("t0,99.0,1\nt1,100.0,0\n");

        assert_eq!(loaded.observations.len(), 1);
        assert_eq!(loaded.observations[0].timestamp, "t1");
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let loaded = load(
            "timestamp,price,signal\n\
             t1,100.0,1\n\
             t2,abc,1\n\
             t3,101.0,buy\n\
             t4,102.0\n\
             t5,-1.0,0\n\
             t6,103.0,0\n",
        );

        assert_eq!(loaded.skipped_rows, 4);
        let stamps: Vec<&str> = loaded
            .observations
            .iter()
            .map(|o| o.timestamp.as_str())
            .collect();
        assert_eq!(stamps, vec!["t1", "t6"]);
    }

    #[test]
    fn test_order_preserved_and_not_sorted() {
        let loaded = load("h\n2024-03-01,1.0,0\n2024-01-01,2.0,1\n");

        assert_eq!(loaded.observations[0].timestamp, "2024-03-01");
        assert_eq!(loaded.observations[1].timestamp, "2024-01-01");
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let loaded = load("timestamp,price,signal,note\n t1 , 100.0 , 1 ,extra\n");

        assert_eq!(loaded.observations, vec![Observation::new("t1", 100.0, 1)]);
    }

    #[test]
    fn test_signal_parsing() {
        assert_eq!(parse_signal("1").unwrap(), 1);
        assert_eq!(parse_signal("0").unwrap(), 0);
        assert_eq!(parse_signal("1.0").unwrap(), 1);
        assert_eq!(parse_signal("2").unwrap(), 2);
        assert!(parse_signal("0.5").is_err());
        assert!(parse_signal("").is_err());
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let loaded = load("timestamp,price,signal\n");
        assert!(loaded.observations.is_empty());
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvSignalSource::new("/nonexistent/signals.csv");
        assert!(matches!(source.load(), Err(DataError::Io { .. })));
    }

    #[test]
    fn test_blank_lines_counted_as_skipped() {
        let loaded = load("timestamp,price,signal\nt1,100.0,1\n\nt2,101.0,0\r\n\r\nt3,102.0,1\n\n");

        assert_eq!(loaded.observations.len(), 3);
        assert_eq!(loaded.skipped_rows, 3);
    }

    #[test]
    fn test_blank_header_line_not_counted() {
        let loaded = load("\nt1,100.0,1\n");

        assert_eq!(loaded.observations, vec![Observation::new("t1", 100.0, 1)]);
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn test_load_signals_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.csv");
        fs::write(&path, "timestamp,price,signal\nt1,100.0,1\nt2,bad,0\nt3,90.0,0\n").unwrap();

        let source = CsvSignalSource::new(&path);
        let loaded = source.load_signals().unwrap();
        assert_eq!(loaded.observations.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);
        assert_eq!(source.name(), path.display().to_string());
    }

    #[test]
    fn test_only_malformed_rows_is_no_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.csv");
        fs::write(&path, "timestamp,price,signal\nt1,abc,1\nt2,,0\n\n").unwrap();

        let err = CsvSignalSource::new(&path).load_signals().unwrap_err();
        assert!(matches!(err, DataError::NoDataAvailable { skipped: 3, .. }));
    }
}
