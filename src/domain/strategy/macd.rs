//! MACD signal-line strategy.
//!
//! Buy when the MACD line rises above signal × (1 + threshold), sell when it
//! falls below signal × (1 − threshold). Holds while either line is unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::{Indicator, Macd};
use crate::domain::ohlcv::{DataKind, SingleValue};
use crate::domain::signal::{Hysteresis, Signal};

#[derive(Debug, Clone)]
pub struct MacdStrategy {
    macd: Macd,
    threshold: f64,
    hysteresis: Hysteresis,
}

impl MacdStrategy {
    pub const REQUIRED_DATA: DataKind = DataKind::SingleValue;

    pub fn new(
        short_period: usize,
        long_period: usize,
        signal_period: usize,
        smoothing: f64,
        threshold: f64,
    ) -> Result<Self, TzuError> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(TzuError::invalid("threshold", "must be non-negative"));
        }
        Ok(MacdStrategy {
            macd: Macd::new(short_period, long_period, signal_period, smoothing)?,
            threshold,
            hysteresis: Hysteresis::new(),
        })
    }

    pub fn required_data(&self) -> DataKind {
        Self::REQUIRED_DATA
    }

    pub fn name(&self) -> String {
        format!("MACD_STRATEGY({})", self.macd.indicator_type())
    }

    pub fn update(&mut self, data: &SingleValue) -> Signal {
        let Some((line, signal)) = self
            .macd
            .update(data.value)
            .and_then(|v| v.signal.map(|signal| (v.line, signal)))
        else {
            return Signal::hold(data.timestamp, data.value);
        };
        let side = self.hysteresis.decide(
            line > signal * (1.0 + self.threshold),
            line < signal * (1.0 - self.threshold),
        );
        Signal::new(data.timestamp, side, data.value)
    }
}
