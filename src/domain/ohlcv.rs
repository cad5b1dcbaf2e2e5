//! Market record shapes consumed by strategies.
//!
//! Timestamps are integer seconds and must be non-decreasing across a run.

use std::fmt;
use std::str::FromStr;

use crate::domain::signal::Side;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ohlcv {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Ohlcv {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn field(&self, field: OhlcvField) -> f64 {
        match field {
            OhlcvField::Open => self.open,
            OhlcvField::High => self.high,
            OhlcvField::Low => self.low,
            OhlcvField::Close => self.close,
            OhlcvField::Volume => self.volume,
        }
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Selects which series of an [`Ohlcv`] bar a strategy quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OhlcvField {
    Open,
    High,
    Low,
    #[default]
    Close,
    Volume,
}

impl FromStr for OhlcvField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(OhlcvField::Open),
            "high" => Ok(OhlcvField::High),
            "low" => Ok(OhlcvField::Low),
            "close" => Ok(OhlcvField::Close),
            "volume" => Ok(OhlcvField::Volume),
            other => Err(format!("unknown OHLCV field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tick {
    pub timestamp: i64,
    pub price: f64,
    pub volume: f64,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SingleValue {
    pub timestamp: i64,
    pub value: f64,
}

/// Capability tag naming the record shape a strategy consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Ohlcv,
    Tick,
    SingleValue,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Ohlcv => write!(f, "ohlcv"),
            DataKind::Tick => write!(f, "tick"),
            DataKind::SingleValue => write!(f, "single_value"),
        }
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ohlcv" => Ok(DataKind::Ohlcv),
            "tick" => Ok(DataKind::Tick),
            "single_value" | "singlevalue" | "value" => Ok(DataKind::SingleValue),
            other => Err(format!("unknown data kind '{other}'")),
        }
    }
}

/// One parsed row of a record source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record {
    Ohlcv(Ohlcv),
    Tick(Tick),
    SingleValue(SingleValue),
}

impl Record {
    pub fn kind(&self) -> DataKind {
        match self {
            Record::Ohlcv(_) => DataKind::Ohlcv,
            Record::Tick(_) => DataKind::Tick,
            Record::SingleValue(_) => DataKind::SingleValue,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Record::Ohlcv(bar) => bar.timestamp,
            Record::Tick(tick) => tick.timestamp,
            Record::SingleValue(sv) => sv.timestamp,
        }
    }
}
