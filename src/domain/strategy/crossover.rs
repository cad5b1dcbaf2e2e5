//! Moving-average crossover strategy.
//!
//! Buy when short > long × (1 + threshold), sell when short < long × (1 − threshold).
//! Holds until both averages are available.

use std::str::FromStr;

use crate::domain::error::TzuError;
use crate::domain::indicator::{Ema, Indicator, IndicatorType, Sma};
use crate::domain::ohlcv::{DataKind, SingleValue};
use crate::domain::signal::{Hysteresis, Signal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovingAverageKind {
    #[default]
    Sma,
    Ema,
}

impl FromStr for MovingAverageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sma" => Ok(MovingAverageKind::Sma),
            "ema" => Ok(MovingAverageKind::Ema),
            other => Err(format!("unknown moving average '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
enum MovingAverage {
    Sma(Sma),
    Ema(Ema),
}

impl MovingAverage {
    fn new(kind: MovingAverageKind, period: usize) -> Result<Self, TzuError> {
        Ok(match kind {
            MovingAverageKind::Sma => MovingAverage::Sma(Sma::new(period)?),
            MovingAverageKind::Ema => MovingAverage::Ema(Ema::new(period)?),
        })
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        match self {
            MovingAverage::Sma(sma) => sma.update(value),
            MovingAverage::Ema(ema) => ema.update(value),
        }
    }

    fn indicator_type(&self) -> IndicatorType {
        match self {
            MovingAverage::Sma(sma) => sma.indicator_type(),
            MovingAverage::Ema(ema) => ema.indicator_type(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Crossover {
    short: MovingAverage,
    long: MovingAverage,
    threshold: f64,
    hysteresis: Hysteresis,
}

impl Crossover {
    pub const REQUIRED_DATA: DataKind = DataKind::SingleValue;

    pub fn new(
        kind: MovingAverageKind,
        short_period: usize,
        long_period: usize,
        threshold: f64,
    ) -> Result<Self, TzuError> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(TzuError::invalid("threshold", "must be non-negative"));
        }
        Ok(Crossover {
            short: MovingAverage::new(kind, short_period)?,
            long: MovingAverage::new(kind, long_period)?,
            threshold,
            hysteresis: Hysteresis::new(),
        })
    }

    pub fn required_data(&self) -> DataKind {
        Self::REQUIRED_DATA
    }

    pub fn name(&self) -> String {
        format!(
            "CROSSOVER({},{})",
            self.short.indicator_type(),
            self.long.indicator_type()
        )
    }

    pub fn update(&mut self, data: &SingleValue) -> Signal {
        let short = self.short.update(data.value);
        let long = self.long.update(data.value);
        let (Some(short), Some(long)) = (short, long) else {
            return Signal::hold(data.timestamp, data.value);
        };
        let side = self.hysteresis.decide(
            short > long * (1.0 + self.threshold),
            short < long * (1.0 - self.threshold),
        );
        Signal::new(data.timestamp, side, data.value)
    }
}
