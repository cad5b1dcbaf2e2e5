//! Moving standard deviation: square root of [`MVar`].

use crate::domain::error::TzuError;
use crate::domain::indicator::{Indicator, IndicatorType, MVar};

#[derive(Debug, Clone)]
pub struct MStd {
    mvar: MVar,
    value: Option<f64>,
}

impl MStd {
    pub fn new(window: usize, dof: usize) -> Result<Self, TzuError> {
        Ok(MStd {
            mvar: MVar::new(window, dof)?,
            value: None,
        })
    }

    pub fn mean(&self) -> Option<f64> {
        self.mvar.mean()
    }
}

impl Indicator for MStd {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, value: f64) -> Option<f64> {
        if let Some(var) = self.mvar.update(value) {
            self.value = Some(var.sqrt());
        }
        self.value
    }

    fn get(&self) -> Option<f64> {
        self.value
    }

    fn indicator_type(&self) -> IndicatorType {
        IndicatorType::MStd {
            window: self.mvar.window(),
            dof: self.mvar.dof(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stddev_warmup() {
        let mut std = MStd::new(3, 0).unwrap();
        assert!(std.update(10.0).is_none());
        assert!(std.update(20.0).is_none());
        assert!(std.update(30.0).is_some());
    }

    #[test]
    fn stddev_known_values() {
        // population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let mut std = MStd::new(8, 0).unwrap();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            std.update(v);
        }
        assert!((std.get().unwrap() - 2.0).abs() < 1e-12);
        assert!((std.mean().unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn stddev_sample_matches_sqrt_of_variance() {
        let mut std = MStd::new(3, 1).unwrap();
        for v in [10.0, 20.0, 30.0] {
            std.update(v);
        }
        assert!((std.get().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn stddev_indicator_type() {
        let std = MStd::new(20, 1).unwrap();
        assert_eq!(
            std.indicator_type(),
            IndicatorType::MStd { window: 20, dof: 1 }
        );
    }
}
