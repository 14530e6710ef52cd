//! CSV directory history source.
//!
//! Layout: one `<INSTRUMENT>.csv` file per instrument inside a directory,
//! with a header row containing a date column (`date`/`Date`) and a close
//! column. `Adj Close` is preferred over `Close` when both are present, so
//! files exported from common market-data tools load unchanged.
//!
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-01-02,36.10,36.55,35.90,36.40,34.87,41230000
//! ```
//!
//! Empty close cells (non-trading days in some exports) are skipped and left
//! to the repository's missing-data policy.

use crate::repository::HistorySource;
use crate::series::PriceSeries;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use risk_core::{Date, InstrumentId, LookbackWindow, RiskError};
use std::path::{Path, PathBuf};
use tracing::debug;

const DATE_HEADERS: [&str; 2] = ["date", "timestamp"];
const CLOSE_HEADERS: [&str; 3] = ["adj close", "adj_close", "close"];

/// History source reading per-instrument CSV files from a directory.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    root: PathBuf,
}

impl CsvHistory {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an instrument's file.
    pub fn path_for(&self, instrument: &InstrumentId) -> PathBuf {
        self.root.join(format!("{}.csv", instrument.as_str()))
    }

    /// Writes a series as `date,close` CSV under the source directory,
    /// creating the directory if needed. Returns the written path.
    pub fn write_series(
        &self,
        instrument: &InstrumentId,
        series: &PriceSeries,
    ) -> Result<PathBuf, RiskError> {
        std::fs::create_dir_all(&self.root).map_err(|e| self.unreachable(&self.root, e))?;
        let path = self.path_for(instrument);

        let mut writer = WriterBuilder::new()
            .from_path(&path)
            .map_err(|e| self.unreachable(&path, e))?;
        writer
            .write_record(["date", "close"])
            .map_err(|e| self.unreachable(&path, e))?;
        for (date, close) in series.iter() {
            writer
                .write_record([date.to_string(), format!("{:.6}", close)])
                .map_err(|e| self.unreachable(&path, e))?;
        }
        writer.flush().map_err(|e| self.unreachable(&path, e))?;

        Ok(path)
    }

    fn unreachable(&self, path: &Path, err: impl std::fmt::Display) -> RiskError {
        RiskError::source_unreachable(self.name(), format!("{}: {}", path.display(), err))
    }

    fn malformed(&self, path: &Path, line: u64, msg: impl std::fmt::Display) -> RiskError {
        RiskError::source_unreachable(
            self.name(),
            format!("{} line {}: {}", path.display(), line, msg),
        )
    }
}

/// Finds the first header matching one of `candidates`, in candidate order.
fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
    })
}

impl HistorySource for CsvHistory {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(
        &self,
        instrument: &InstrumentId,
        _window: &LookbackWindow,
    ) -> Result<PriceSeries, RiskError> {
        if !self.root.is_dir() {
            return Err(self.unreachable(&self.root, "not a readable directory"));
        }
        let path = self.path_for(instrument);
        if !path.is_file() {
            return Err(RiskError::data_unavailable(instrument.as_str()));
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| self.unreachable(&path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| self.unreachable(&path, e))?
            .clone();
        let date_col = find_column(&headers, &DATE_HEADERS)
            .ok_or_else(|| self.malformed(&path, 1, "missing date column"))?;
        let close_col = find_column(&headers, &CLOSE_HEADERS)
            .ok_or_else(|| self.malformed(&path, 1, "missing close column"))?;

        let mut series = PriceSeries::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.unreachable(&path, e))?;
            let line = record.position().map_or(0, |p| p.line());

            let raw_close = record.get(close_col).unwrap_or_default();
            if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
                continue;
            }

            let raw_date = record.get(date_col).unwrap_or_default();
            // Timestamped exports carry "YYYY-MM-DD HH:MM:SS"; keep the date part
            let date_part = raw_date.get(..10).unwrap_or(raw_date);
            let date = Date::parse(date_part).map_err(|e| self.malformed(&path, line, e))?;
            let close: f64 = raw_close
                .parse()
                .map_err(|_| self.malformed(&path, line, format!("invalid close '{}'", raw_close)))?;

            series.insert(date, close);
        }

        debug!(
            path = %path.display(),
            observations = series.len(),
            "read csv price history"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn window() -> LookbackWindow {
        LookbackWindow::new(
            Date::from_ymd(2024, 1, 1).unwrap(),
            Date::from_ymd(2024, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_prefers_adjusted_close() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AAA.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,10,11,9,10.5,10.0,100\n\
             2024-01-03,10,11,9,11.5,11.0,100\n",
        )
        .unwrap();

        let series = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("AAA"), &window())
            .unwrap();
        let closes: Vec<f64> = series.iter().map(|(_, p)| p).collect();
        assert_eq!(closes, vec![10.0, 11.0]);
    }

    #[test]
    fn test_skips_empty_close_cells() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("BBB.csv"),
            "date,close\n2024-01-02,10\n2024-01-03,\n2024-01-04,null\n2024-01-05,12\n",
        )
        .unwrap();

        let series = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("BBB"), &window())
            .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_accepts_timestamped_dates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("CCC.csv"),
            "Date,Close\n2024-01-02 00:00:00-03:00,10\n",
        )
        .unwrap();

        let series = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("CCC"), &window())
            .unwrap();
        assert_eq!(series.get(Date::from_ymd(2024, 1, 2).unwrap()), Some(10.0));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("NOPE"), &window())
            .unwrap_err();
        assert_eq!(err, RiskError::data_unavailable("NOPE"));
    }

    #[test]
    fn test_missing_directory_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvHistory::new(dir.path().join("absent"))
            .load(&InstrumentId::new("A"), &window())
            .unwrap_err();
        assert!(matches!(err, RiskError::SourceUnreachable { .. }));
    }

    #[test]
    fn test_malformed_price_names_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "date,close\n2024-01-02,abc\n").unwrap();

        let err = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("BAD"), &window())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "unexpected message: {}", msg);
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_missing_close_column() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("X.csv"), "date,open\n2024-01-02,1\n").unwrap();

        let err = CsvHistory::new(dir.path())
            .load(&InstrumentId::new("X"), &window())
            .unwrap_err();
        assert!(err.to_string().contains("missing close column"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvHistory::new(dir.path().join("nested"));
        let id = InstrumentId::new("W");
        let series: PriceSeries = vec![
            (Date::from_ymd(2024, 2, 1).unwrap(), 20.25),
            (Date::from_ymd(2024, 2, 2).unwrap(), 20.5),
        ]
        .into_iter()
        .collect();

        let path = source.write_series(&id, &series).unwrap();
        assert!(path.ends_with("W.csv"));
        assert_eq!(source.load(&id, &window()).unwrap(), series);
    }
}
