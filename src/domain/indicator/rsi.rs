//! RSI (Relative Strength Index).
//!
//! Per bar, diff = close - open feeds an SMA(n) of gains (max(diff, 0)) and an
//! SMA(n) of losses (max(-diff, 0)).
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! avg_loss == 0 with avg_gain > 0 evaluates to exactly 100 (the ratio is +inf).
//! A bar window with neither gains nor losses has no defined RSI (0/0) and is
//! reported as unavailable until a gain or loss enters the window.
//!
//! Warmup: the first (n-1) bars are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::{Indicator, IndicatorType, Sma};
use crate::domain::ohlcv::Ohlcv;

pub const DEFAULT_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    gains: Sma,
    losses: Sma,
    value: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, TzuError> {
        Ok(Rsi {
            gains: Sma::new(period)?,
            losses: Sma::new(period)?,
            value: None,
        })
    }

    pub fn period(&self) -> usize {
        self.gains.window()
    }
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return None;
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

impl Indicator for Rsi {
    type Input = Ohlcv;
    type Output = f64;

    fn update(&mut self, bar: Ohlcv) -> Option<f64> {
        let diff = bar.close - bar.open;
        let gain = self.gains.update(diff.max(0.0));
        let loss = self.losses.update((-diff).max(0.0));
        self.value = match (gain, loss) {
            (Some(avg_gain), Some(avg_loss)) => relative_strength_index(avg_gain, avg_loss),
            _ => None,
        };
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Rsi(self.period())
    }
}
