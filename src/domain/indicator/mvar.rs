//! Moving variance.
//!
//! MVAR(n, dof)[i] = sum((v[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - dof)
//! dof = 0 gives the population variance, dof = 1 the sample variance.
//! Warmup: the first (n-1) updates are unavailable.

use crate::domain::error::TzuError;
use crate::domain::indicator::ring_buffer::RingBuffer;
use crate::domain::indicator::{require_window, Indicator, IndicatorType, Sma};

#[derive(Debug, Clone)]
pub struct MVar {
    sma: Sma,
    buffer: RingBuffer,
    dof: usize,
    value: Option<f64>,
}

impl MVar {
    pub fn new(window: usize, dof: usize) -> Result<Self, TzuError> {
        require_window("window", window)?;
        if dof >= window {
            return Err(TzuError::invalid(
                "dof",
                format!("must be smaller than the window ({window})"),
            ));
        }
        Ok(MVar {
            sma: Sma::new(window)?,
            buffer: RingBuffer::new(window),
            dof,
            value: None,
        })
    }

    pub fn window(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Mean of the current window, available together with the variance.
    pub fn mean(&self) -> Option<f64> {
        self.sma.get()
    }
}

impl Indicator for MVar {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        self.buffer.push(value);
        let mean = self.sma.update(value)?;
        let accum: f64 = self
            .buffer
            .iter()
            .map(|x| {
                let diff = x - mean;
                diff * diff
            })
            .sum();
        self.value = Some(accum / (self.window() - self.dof) as f64);
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::MVar {
            window: self.window(),
            dof: self.dof,
        }
    }
}
