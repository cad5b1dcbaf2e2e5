//! Signal strategies.
//!
//! Each strategy consumes one record shape, named by its [`DataKind`] tag, and
//! turns indicator readings into a [`Signal`] per record. A strategy never
//! emits the same non-Hold side twice in a row (see [`Hysteresis`]).
//!
//! [`Hysteresis`]: crate::domain::signal::Hysteresis

pub mod crossover;
pub mod macd;
pub mod rsi;

pub use crossover::{Crossover, MovingAverageKind};
pub use macd::MacdStrategy;
pub use rsi::RsiStrategy;

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TzuError;
use crate::domain::ohlcv::{DataKind, Record};
use crate::domain::signal::Signal;

/// Configuration name of a strategy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Crossover,
    Rsi,
    Macd,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Crossover => write!(f, "crossover"),
            StrategyKind::Rsi => write!(f, "rsi"),
            StrategyKind::Macd => write!(f, "macd"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crossover" => Ok(StrategyKind::Crossover),
            "rsi" => Ok(StrategyKind::Rsi),
            "macd" => Ok(StrategyKind::Macd),
            other => Err(format!("unknown strategy type '{other}'")),
        }
    }
}

/// The strategies a backtest can be wired with, dispatched on the record
/// shape each one declares.
#[derive(Debug, Clone)]
pub enum Strategy {
    Crossover(Crossover),
    Rsi(RsiStrategy),
    Macd(MacdStrategy),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Crossover(_) => StrategyKind::Crossover,
            Strategy::Rsi(_) => StrategyKind::Rsi,
            Strategy::Macd(_) => StrategyKind::Macd,
        }
    }

    pub fn required_data(&self) -> DataKind {
        match self {
            Strategy::Crossover(_) => Crossover::REQUIRED_DATA,
            Strategy::Rsi(_) => RsiStrategy::REQUIRED_DATA,
            Strategy::Macd(_) => MacdStrategy::REQUIRED_DATA,
        }
    }

    /// Fails with [`TzuError::DataKindMismatch`] when `record` is not the shape
    /// this strategy consumes.
    pub fn update(&mut self, record: &Record) -> Result<Signal, TzuError> {
        match (self, record) {
            (Strategy::Crossover(s), Record::SingleValue(sv)) => Ok(s.update(sv)),
            (Strategy::Rsi(s), Record::Ohlcv(bar)) => Ok(s.update(bar)),
            (Strategy::Macd(s), Record::SingleValue(sv)) => Ok(s.update(sv)),
            (strategy, record) => Err(TzuError::DataKindMismatch {
                expected: strategy.required_data(),
                found: record.kind(),
            }),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Strategy::Crossover(s) => s.name(),
            Strategy::Rsi(s) => s.name(),
            Strategy::Macd(s) => s.name(),
        }
    }
}

impl From<Crossover> for Strategy {
    fn from(s: Crossover) -> Self {
        Strategy::Crossover(s)
    }
}

impl From<RsiStrategy> for Strategy {
    fn from(s: RsiStrategy) -> Self {
        Strategy::Rsi(s)
    }
}

impl From<MacdStrategy> for Strategy {
    fn from(s: MacdStrategy) -> Self {
        Strategy::Macd(s)
    }
}
