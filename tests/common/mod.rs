#![allow(dead_code)]

use std::io::Write;

use tzutrader::domain::error::TzuError;
use tzutrader::domain::ohlcv::{DataKind, Ohlcv, Record, SingleValue};
use tzutrader::ports::data_port::{DataPort, RecordStream};

pub const DAY: i64 = 24 * 3600;
pub const START: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z

/// In-memory record source; every `stream()` replays the same records.
pub struct MockDataPort {
    pub kind: DataKind,
    pub records: Vec<Record>,
}

impl MockDataPort {
    pub fn new(kind: DataKind, records: Vec<Record>) -> Self {
        Self { kind, records }
    }
}

impl DataPort for MockDataPort {
    fn kind(&self) -> DataKind {
        self.kind
    }

    fn stream(&self) -> Result<RecordStream, TzuError> {
        Ok(Box::new(self.records.clone().into_iter()))
    }
}

pub fn daily_values(prices: &[f64]) -> Vec<Record> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Record::SingleValue(SingleValue {
                timestamp: START + i as i64 * DAY,
                value,
            })
        })
        .collect()
}

/// Bars opening at the previous close.
pub fn daily_bars(closes: &[f64]) -> Vec<Record> {
    let mut prev = closes.first().copied().unwrap_or_default();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = prev;
            prev = close;
            Record::Ohlcv(Ohlcv::new(
                START + i as i64 * DAY,
                open,
                open.max(close),
                open.min(close),
                close,
                1_000.0,
            ))
        })
        .collect()
}

/// A slow sine wave around 100 so moving averages cross several times.
pub fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + 15.0 * (i as f64 / 9.0).sin())
        .collect()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn values_csv(prices: &[f64]) -> String {
    let mut csv = String::from("timestamp,value\n");
    for (i, price) in prices.iter().enumerate() {
        csv.push_str(&format!("{},{}\n", START + i as i64 * DAY, price));
    }
    csv
}
