//! Trading decisions emitted by strategies.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
            Side::Hold => write!(f, "HOLD"),
        }
    }
}

pub const DEFAULT_SIGNAL_VOLUME: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub timestamp: i64,
    pub side: Side,
    pub price: f64,
    pub volume: f64,
}

impl Signal {
    pub fn new(timestamp: i64, side: Side, price: f64) -> Self {
        Signal {
            timestamp,
            side,
            price,
            volume: DEFAULT_SIGNAL_VOLUME,
        }
    }

    pub fn hold(timestamp: i64, price: f64) -> Self {
        Signal::new(timestamp, Side::Hold, price)
    }

    pub fn is_hold(&self) -> bool {
        self.side == Side::Hold
    }
}

/// Suppresses a non-Hold decision matching the last emitted non-Hold side.
///
/// Buy takes precedence when both conditions hold on the same update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hysteresis {
    last_side: Side,
}

impl Hysteresis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&mut self, buy: bool, sell: bool) -> Side {
        if buy && self.last_side != Side::Buy {
            self.last_side = Side::Buy;
            Side::Buy
        } else if sell && self.last_side != Side::Sell {
            self.last_side = Side::Sell;
            Side::Sell
        } else {
            Side::Hold
        }
    }

    pub fn last_side(&self) -> Side {
        self.last_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_defaults_volume() {
        let sig = Signal::new(10, Side::Buy, 101.5);
        assert_eq!(sig.volume, DEFAULT_SIGNAL_VOLUME);
        assert!(!sig.is_hold());
        assert!(Signal::hold(10, 1.0).is_hold());
    }

    #[test]
    fn hysteresis_suppresses_repeats() {
        let mut h = Hysteresis::new();
        assert_eq!(h.decide(true, false), Side::Buy);
        assert_eq!(h.decide(true, false), Side::Hold);
        assert_eq!(h.decide(false, true), Side::Sell);
        assert_eq!(h.decide(false, true), Side::Hold);
        assert_eq!(h.decide(true, false), Side::Buy);
        assert_eq!(h.last_side(), Side::Buy);
    }

    #[test]
    fn hysteresis_hold_keeps_last_side() {
        let mut h = Hysteresis::new();
        assert_eq!(h.decide(false, true), Side::Sell);
        assert_eq!(h.decide(false, false), Side::Hold);
        assert_eq!(h.decide(false, true), Side::Hold);
        assert_eq!(h.last_side(), Side::Sell);
    }

    #[test]
    fn hysteresis_falls_through_to_sell_when_buy_repeats() {
        let mut h = Hysteresis::new();
        h.decide(true, false);
        assert_eq!(h.decide(true, true), Side::Sell);
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!(Side::Sell.to_string(), "SELL");
        assert_eq!(Side::Hold.to_string(), "HOLD");
    }
}
