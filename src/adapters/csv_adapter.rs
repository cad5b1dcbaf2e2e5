//! CSV record source.
//!
//! Column layouts, one record per row:
//! - ohlcv: `timestamp,open,high,low,close,volume`
//! - tick: `timestamp,price,volume[,side]` (side 0 = buy, 1 = sell, else hold)
//! - single_value: `timestamp,value`
//!
//! Timestamps are integer epoch seconds. Rows that do not parse are skipped
//! with a warning.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::StringRecord;
use tracing::warn;

use crate::domain::error::TzuError;
use crate::domain::ohlcv::{DataKind, Ohlcv, Record, SingleValue, Tick};
use crate::domain::signal::Side;
use crate::ports::data_port::{DataPort, RecordStream};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone)]
pub struct CsvAdapter {
    path: PathBuf,
    kind: DataKind,
    has_headers: bool,
}

impl CsvAdapter {
    pub fn new(path: impl Into<PathBuf>, kind: DataKind, has_headers: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            has_headers,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read>, TzuError> {
        if self.path.as_os_str() == STDIN_PATH {
            return Ok(Box::new(io::stdin()));
        }
        let file = File::open(&self.path).map_err(|e| TzuError::DataSource {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })?;
        Ok(Box::new(file))
    }
}

impl DataPort for CsvAdapter {
    fn kind(&self) -> DataKind {
        self.kind
    }

    /// Standard input cannot be rewound; a second stream over `-` continues
    /// from wherever the previous one stopped.
    fn stream(&self) -> Result<RecordStream, TzuError> {
        let reader = self.open()?;
        Ok(parse_records(reader, self.kind, self.has_headers))
    }
}

/// Lazily parses `reader` as CSV rows of `kind`.
pub fn parse_records<R>(reader: R, kind: DataKind, has_headers: bool) -> RecordStream
where
    R: Read + 'static,
{
    let rows = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records();

    Box::new(rows.filter_map(move |row| match row {
        Ok(row) => match parse_row(kind, &row) {
            Ok(record) => Some(record),
            Err(reason) => {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                warn!(line, %reason, "skipping malformed {} row", kind);
                None
            }
        },
        Err(e) => {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            warn!(line, error = %e, "skipping unreadable row");
            None
        }
    }))
}

/// Parses one CSV row into a record of the given shape.
pub fn parse_row(kind: DataKind, row: &StringRecord) -> Result<Record, String> {
    match kind {
        DataKind::Ohlcv => {
            expect_columns(row, 6, 6)?;
            Ok(Record::Ohlcv(Ohlcv::new(
                column(row, 0, "timestamp")?,
                column(row, 1, "open")?,
                column(row, 2, "high")?,
                column(row, 3, "low")?,
                column(row, 4, "close")?,
                column(row, 5, "volume")?,
            )))
        }
        DataKind::Tick => {
            expect_columns(row, 3, 4)?;
            Ok(Record::Tick(Tick {
                timestamp: column(row, 0, "timestamp")?,
                price: column(row, 1, "price")?,
                volume: column(row, 2, "volume")?,
                side: parse_side(row.get(3)),
            }))
        }
        DataKind::SingleValue => {
            expect_columns(row, 2, 2)?;
            Ok(Record::SingleValue(SingleValue {
                timestamp: column(row, 0, "timestamp")?,
                value: column(row, 1, "value")?,
            }))
        }
    }
}

fn expect_columns(row: &StringRecord, min: usize, max: usize) -> Result<(), String> {
    let found = row.len();
    if found < min || found > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{}-{}", min, max)
        };
        return Err(format!("expected {} columns, found {}", expected, found));
    }
    Ok(())
}

fn column<T: FromStr>(row: &StringRecord, index: usize, name: &str) -> Result<T, String> {
    let raw = row
        .get(index)
        .ok_or_else(|| format!("missing {} column", name))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value {:?}", name, raw))
}

fn parse_side(raw: Option<&str>) -> Side {
    match raw.map(str::parse::<i64>) {
        Some(Ok(0)) => Side::Buy,
        Some(Ok(1)) => Side::Sell,
        _ => Side::Hold,
    }
}
