//! Open positions and closed trades.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub open_timestamp: i64,
    pub quantity: f64,
    pub acquisition_price: f64,
    pub entry_commission: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.acquisition_price)
    }

    /// `stop_loss` is a fraction of the acquisition price, e.g. 0.10 for 10%.
    pub fn should_stop_loss(&self, price: f64, stop_loss: Option<f64>) -> bool {
        match stop_loss {
            Some(pct) => price <= self.acquisition_price * (1.0 - pct),
            None => false,
        }
    }

    /// `take_profit` is a fraction of the acquisition price, e.g. 0.25 for 25%.
    pub fn should_take_profit(&self, price: f64, take_profit: Option<f64>) -> bool {
        match take_profit {
            Some(pct) => price >= self.acquisition_price * (1.0 + pct),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitReason {
    Signal,
    StopLoss,
    TakeProfit,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Signal => write!(f, "signal"),
            ExitReason::StopLoss => write!(f, "stop-loss"),
            ExitReason::TakeProfit => write!(f, "take-profit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub open_timestamp: i64,
    pub close_timestamp: i64,
    pub quantity: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Entry plus exit commission.
    pub commission: f64,
    /// Net of both commissions.
    pub pnl: f64,
    pub reason: ExitReason,
}
