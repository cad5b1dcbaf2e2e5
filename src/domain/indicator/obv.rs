//! OBV (On-Balance Volume).

use crate::domain::indicator::{Indicator, IndicatorType};
use crate::domain::ohlcv::Ohlcv;

/// OBV[0] = volume[0]
/// If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
/// If close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
/// If close[i] == close[i-1]: OBV[i] = OBV[i-1]
///
/// No warmup; the first bar is already available.
#[derive(Debug, Clone, Default)]
pub struct Obv {
    prev_close: Option<f64>,
    value: Option<f64>,
}

impl Obv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for Obv {
    type Input = Ohlcv;
    type Output = f64;

    fn update(&mut self, bar: Ohlcv) -> Option<f64> {
        let obv = match (self.prev_close, self.value) {
            (Some(prev), Some(obv)) if bar.close > prev => obv + bar.volume,
            (Some(prev), Some(obv)) if bar.close < prev => obv - bar.volume,
            (Some(_), Some(obv)) => obv,
            _ => bar.volume,
        };
        self.prev_close = Some(bar.close);
        self.value = Some(obv);
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Obv
    }
}
