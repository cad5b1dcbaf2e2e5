//! Incremental technical indicators.
//!
//! Every indicator is fed one observation at a time through [`Indicator::update`]
//! and does bounded work per call. `None` means no value is defined: the
//! indicator is still warming up, or (RSI only) its window is undefined.
//! Indicators cannot be rewound or reset: a new run needs new instances.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mvar;
pub mod obv;
pub mod ring_buffer;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::{Bollinger, BollingerBands};
pub use ema::Ema;
pub use macd::{Macd, MacdValue};
pub use mvar::MVar;
pub use obv::Obv;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stddev::MStd;

use std::fmt;

use crate::domain::error::TzuError;

pub trait Indicator {
    type Input;
    type Output: Copy;

    /// Feeds one observation and returns the new output.
    fn update(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Last output, without side effects.
    fn get(&self) -> Option<Self::Output>;

    fn indicator_type(&self) -> IndicatorType;
}

/// Indicator identity and parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    MVar { window: usize, dof: usize },
    MStd { window: usize, dof: usize },
    Rsi(usize),
    Macd {
        short: usize,
        long: usize,
        signal: usize,
    },
    Bollinger { window: usize, multiplier: f64 },
    Roc(usize),
    Obv,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "SMA({})", window),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::MVar { window, dof } => write!(f, "MVAR({},{})", window, dof),
            IndicatorType::MStd { window, dof } => write!(f, "MSTD({},{})", window, dof),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd {
                short,
                long,
                signal,
            } => write!(f, "MACD({},{},{})", short, long, signal),
            IndicatorType::Bollinger { window, multiplier } => {
                write!(f, "BOLLINGER({},{})", window, multiplier)
            }
            IndicatorType::Roc(period) => write!(f, "ROC({})", period),
            IndicatorType::Obv => write!(f, "OBV"),
        }
    }
}

pub(crate) fn require_window(name: &str, window: usize) -> Result<(), TzuError> {
    if window == 0 {
        return Err(TzuError::invalid(name, "must be at least 1"));
    }
    Ok(())
}
