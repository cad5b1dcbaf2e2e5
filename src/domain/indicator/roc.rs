//! ROC (Rate of Change).
//!
//! ROC(n)[i] = ((v[i] - v[i-n]) / v[i-n]) * 100
//! If v[i-n] == 0: ROC = 0
//! Warmup: the first n updates are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::ring_buffer::RingBuffer;
use crate::domain::indicator::{require_window, Indicator, IndicatorType};

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    buffer: RingBuffer,
    value: Option<f64>,
}

impl Roc {
    pub fn new(period: usize) -> Result<Self, TzuError> {
        require_window("period", period)?;
        Ok(Roc {
            period,
            buffer: RingBuffer::new(period + 1),
            value: None,
        })
    }
}

impl Indicator for Roc {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.buffer.push(value);
        if self.buffer.is_full() {
            let prev = self.buffer.oldest().unwrap_or(0.0);
            self.value = Some(if prev == 0.0 {
                0.0
            } else {
                (value - prev) / prev * 100.0
            });
        }
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Roc(self.period)
    }
}
