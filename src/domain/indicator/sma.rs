//! Simple Moving Average.
//!
//! Keeps a running sum over the last `window` values: the evicted value is
//! subtracted and the new one added, so an update never re-sums the buffer.
//! Warmup: the first (window-1) updates are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::ring_buffer::RingBuffer;
use crate::domain::indicator::{require_window, Indicator, IndicatorType};

#[derive(Debug, Clone)]
pub struct Sma {
    buffer: RingBuffer,
    sum: f64,
    value: Option<f64>,
}

impl Sma {
    pub fn new(window: usize) -> Result<Self, TzuError> {
        require_window("window", window)?;
        Ok(Sma {
            buffer: RingBuffer::new(window),
            sum: 0.0,
            value: None,
        })
    }

    pub fn window(&self) -> usize {
        self.buffer.capacity()
    }
}

impl Indicator for Sma {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        if let Some(evicted) = self.buffer.push(value) {
            self.sum -= evicted;
        }
        self.sum += value;
        if self.buffer.is_full() {
            self.value = Some(self.sum / self.window() as f64);
        }
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::Sma(self.window())
    }
}
