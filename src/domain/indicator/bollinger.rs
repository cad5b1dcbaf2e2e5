//! Bollinger Bands.
//!
//! - Middle: SMA over n values
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation (divides by n).
//! Warmup: the first (n-1) updates are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::{Indicator, IndicatorType, MStd};

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    std: MStd,
    window: usize,
    multiplier: f64,
    value: Option<BollingerBands>,
}

impl Bollinger {
    pub fn new(window: usize, multiplier: f64) -> Result<Self, TzuError> {
        if !(multiplier.is_finite() && multiplier >= 0.0) {
            return Err(TzuError::invalid("multiplier", "must be non-negative"));
        }
        Ok(Bollinger {
            std: MStd::new(window, 0)?,
            window,
            multiplier,
            value: None,
        })
    }
}

impl Indicator for Bollinger {
    type Input = f64;
    type Output = BollingerBands;

    fn update(&mut self, value: f64) -> Option<BollingerBands> {
        if let (Some(std), Some(middle)) = (self.std.update(value), self.std.mean()) {
            self.value = Some(BollingerBands {
                upper: middle + self.multiplier * std,
                middle,
                lower: middle - self.multiplier * std,
            });
        }
        self.value
    }

    fn get(&self) -> Option<BollingerBands> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Bollinger {
            window: self.window,
            multiplier: self.multiplier,
        }
    }
}
