//! RSI mean-reversion strategy.
//!
//! Buy when RSI drops below the oversold level, sell when it rises above the
//! overbought level. The signal quotes the configured OHLCV field.

use crate::domain::error::TzuError;
use crate::domain::indicator::{Indicator, Rsi};
use crate::domain::ohlcv::{DataKind, Ohlcv, OhlcvField};
use crate::domain::signal::{Hysteresis, Signal};

pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone)]
pub struct RsiStrategy {
    rsi: Rsi,
    oversold: f64,
    overbought: f64,
    field: OhlcvField,
    hysteresis: Hysteresis,
}

impl RsiStrategy {
    pub const REQUIRED_DATA: DataKind = DataKind::Ohlcv;

    pub fn new(
        period: usize,
        oversold: f64,
        overbought: f64,
        field: OhlcvField,
    ) -> Result<Self, TzuError> {
        if !(0.0..=100.0).contains(&oversold) {
            return Err(TzuError::invalid("oversold", "must be within [0, 100]"));
        }
        if !(0.0..=100.0).contains(&overbought) {
            return Err(TzuError::invalid("overbought", "must be within [0, 100]"));
        }
        if oversold >= overbought {
            return Err(TzuError::invalid(
                "oversold",
                "must be below the overbought level",
            ));
        }
        Ok(RsiStrategy {
            rsi: Rsi::new(period)?,
            oversold,
            overbought,
            field,
            hysteresis: Hysteresis::new(),
        })
    }

    pub fn required_data(&self) -> DataKind {
        Self::REQUIRED_DATA
    }

    pub fn name(&self) -> String {
        format!(
            "RSI_STRATEGY({},{},{})",
            self.rsi.indicator_type(),
            self.oversold,
            self.overbought
        )
    }

    pub fn update(&mut self, bar: &Ohlcv) -> Signal {
        let price = bar.field(self.field);
        let Some(rsi) = self.rsi.update(*bar) else {
            return Signal::hold(bar.timestamp, price);
        };
        let side = self
            .hysteresis
            .decide(rsi < self.oversold, rsi > self.overbought);
        Signal::new(bar.timestamp, side, price)
    }
}
