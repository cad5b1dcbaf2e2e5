//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(short) - EMA(long)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! The line is available from update max(short, long) onward. The signal EMA
//! only starts accumulating at that point, so it needs a further
//! (signal - 1) updates before it is available.

use crate::domain::error::TzuError;
use crate::domain::indicator::{Ema, Indicator, IndicatorType};

pub const DEFAULT_SHORT: usize = 12;
pub const DEFAULT_LONG: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub line: f64,
    pub signal: Option<f64>,
}

impl MacdValue {
    pub fn histogram(&self) -> Option<f64> {
        self.signal.map(|signal| self.line - signal)
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    short_ema: Ema,
    long_ema: Ema,
    signal_ema: Ema,
    count: usize,
    start: usize,
    value: Option<MacdValue>,
}

impl Macd {
    pub fn new(short: usize, long: usize, signal: usize, smoothing: f64) -> Result<Self, TzuError> {
        Ok(Macd {
            short_ema: Ema::with_smoothing(short, smoothing)?,
            long_ema: Ema::with_smoothing(long, smoothing)?,
            signal_ema: Ema::with_smoothing(signal, smoothing)?,
            count: 0,
            start: short.max(long),
            value: None,
        })
    }
}

impl Indicator for Macd {
    type Input = f64;
    type Output = MacdValue;

    fn update(&mut self, value: f64) -> Option<MacdValue> {
        self.count += 1;
        let short = self.short_ema.update(value);
        let long = self.long_ema.update(value);
        if self.count < self.start {
            return None;
        }
        if let (Some(short), Some(long)) = (short, long) {
            let line = short - long;
            let signal = self.signal_ema.update(line);
            self.value = Some(MacdValue { line, signal });
        }
        self.value
    }

    fn get(&self) -> Option<MacdValue> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Macd {
            short: self.short_ema.period(),
            long: self.long_ema.period(),
            signal: self.signal_ema.period(),
        }
    }
}
