//! Exponential Moving Average.
//!
//! alpha = smoothing/(n+1), seeded with the mean of the first n values, then
//! EMA[i] = v[i]*alpha + EMA[i-1]*(1-alpha).
//! Warmup: the first (n-1) updates are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::{require_window, Indicator, IndicatorType};

pub const DEFAULT_SMOOTHING: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    alpha: f64,
    count: usize,
    acc: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self, TzuError> {
        Self::with_smoothing(period, DEFAULT_SMOOTHING)
    }

    pub fn with_smoothing(period: usize, smoothing: f64) -> Result<Self, TzuError> {
        require_window("period", period)?;
        if !(smoothing.is_finite() && smoothing > 0.0) {
            return Err(TzuError::invalid("smoothing", "must be a positive number"));
        }
        Ok(Ema {
            period,
            alpha: smoothing / (period as f64 + 1.0),
            count: 0,
            acc: 0.0,
            value: None,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Indicator for Ema {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.count += 1;
        if self.count < self.period {
            self.acc += value;
        } else if self.count == self.period {
            self.acc += value;
            self.acc /= self.period as f64;
            self.value = Some(self.acc);
        } else {
            self.acc = value * self.alpha + self.acc * (1.0 - self.alpha);
            self.value = Some(self.acc);
        }
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Ema(self.period)
    }
}
