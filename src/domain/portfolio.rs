//! Single-asset cash/position ledger driven by strategy signals.
//!
//! Each signal with a positive price is processed in a fixed order:
//! 1. the first valid signal records the initial timestamp/price and seeds
//!    the equity curve with the starting cash
//! 2. every open position is checked against the stop-loss, then the
//!    take-profit level, and liquidated at the signal price if triggered
//! 3. Buy spends the affordable whole quantity; Sell liquidates every
//!    position; Hold does nothing
//! 4. an equity point (cash + holdings at the signal price) is appended
//!
//! Positions are settled independently, so the order in which triggered
//! positions are liquidated within step 2 does not change cash or quantity.

use std::fmt;

use chrono::DateTime;
use tracing::debug;

use super::error::TzuError;
use super::execution;
use super::metrics::{BuyAndHold, Metrics, TradeStats};
use super::position::{ClosedTrade, ExitReason, Position};
use super::signal::{Side, Signal};

pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub timestamp: i64,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioConfig {
    pub initial_cash: f64,
    /// Commission as a fraction of traded value, e.g. 0.001 for 0.1%.
    pub transaction_cost: f64,
    /// Fraction below the acquisition price that liquidates a position.
    pub stop_loss: Option<f64>,
    /// Fraction above the acquisition price that liquidates a position.
    pub take_profit: Option<f64>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            initial_cash: DEFAULT_INITIAL_CASH,
            transaction_cost: 0.0,
            stop_loss: None,
            take_profit: None,
        }
    }
}

impl PortfolioConfig {
    pub fn validate(&self) -> Result<(), TzuError> {
        if !(self.initial_cash.is_finite() && self.initial_cash > 0.0) {
            return Err(TzuError::invalid("initial_cash", "must be positive"));
        }
        if !(self.transaction_cost.is_finite() && self.transaction_cost >= 0.0) {
            return Err(TzuError::invalid(
                "transaction_cost",
                "must be non-negative",
            ));
        }
        if let Some(sl) = self.stop_loss {
            if !(sl > 0.0 && sl < 1.0) {
                return Err(TzuError::invalid("stop_loss", "must be between 0 and 1"));
            }
        }
        if let Some(tp) = self.take_profit {
            if !(tp.is_finite() && tp > 0.0) {
                return Err(TzuError::invalid("take_profit", "must be positive"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    config: PortfolioConfig,
    cash: f64,
    positions: Vec<Position>,
    closed_trades: Vec<ClosedTrade>,
    equity_curve: Vec<EquityPoint>,
    init_timestamp: Option<i64>,
    init_price: Option<f64>,
    last_timestamp: Option<i64>,
    last_price: Option<f64>,
    total_commission: f64,
    trade_count: usize,
    stop_loss_count: usize,
    take_profit_count: usize,
}

impl Portfolio {
    pub fn new(config: PortfolioConfig) -> Result<Self, TzuError> {
        config.validate()?;
        Ok(Portfolio {
            cash: config.initial_cash,
            config,
            positions: Vec::new(),
            closed_trades: Vec::new(),
            equity_curve: Vec::new(),
            init_timestamp: None,
            init_price: None,
            last_timestamp: None,
            last_price: None,
            total_commission: 0.0,
            trade_count: 0,
            stop_loss_count: 0,
            take_profit_count: 0,
        })
    }

    pub fn update(&mut self, signal: &Signal) {
        let price = signal.price;
        // also rejects NaN
        if !(price > 0.0) {
            return;
        }

        if self.init_timestamp.is_none() {
            self.init_timestamp = Some(signal.timestamp);
            self.init_price = Some(price);
            self.record_equity(signal.timestamp, self.config.initial_cash);
        }
        self.last_timestamp = Some(signal.timestamp);
        self.last_price = Some(price);

        self.check_risk(signal.timestamp, price);

        match signal.side {
            Side::Buy => self.open_position(signal.timestamp, price),
            Side::Sell => {
                for position in std::mem::take(&mut self.positions) {
                    self.liquidate(position, signal.timestamp, price, ExitReason::Signal);
                }
            }
            Side::Hold => {}
        }

        let equity = self.cash + self.quantity() * price;
        self.record_equity(signal.timestamp, equity);
    }

    fn check_risk(&mut self, timestamp: i64, price: f64) {
        if self.config.stop_loss.is_none() && self.config.take_profit.is_none() {
            return;
        }
        for position in std::mem::take(&mut self.positions) {
            if position.should_stop_loss(price, self.config.stop_loss) {
                self.liquidate(position, timestamp, price, ExitReason::StopLoss);
            } else if position.should_take_profit(price, self.config.take_profit) {
                self.liquidate(position, timestamp, price, ExitReason::TakeProfit);
            } else {
                self.positions.push(position);
            }
        }
    }

    fn open_position(&mut self, timestamp: i64, price: f64) {
        let Some(fill) = execution::buy(self.cash, price, self.config.transaction_cost) else {
            debug!(timestamp, price, cash = self.cash, "buy skipped: insufficient cash");
            return;
        };
        self.cash -= fill.value + fill.commission;
        self.total_commission += fill.commission;
        self.trade_count += 1;
        debug!(
            timestamp,
            price,
            quantity = fill.quantity,
            commission = fill.commission,
            "opened position"
        );
        self.positions.push(Position {
            open_timestamp: timestamp,
            quantity: fill.quantity,
            acquisition_price: price,
            entry_commission: fill.commission,
        });
    }

    fn liquidate(&mut self, position: Position, timestamp: i64, price: f64, reason: ExitReason) {
        let fill = execution::sell(&position, price, self.config.transaction_cost);
        self.cash += fill.value - fill.commission;
        self.total_commission += fill.commission;
        self.trade_count += 1;
        match reason {
            ExitReason::StopLoss => self.stop_loss_count += 1,
            ExitReason::TakeProfit => self.take_profit_count += 1,
            ExitReason::Signal => {}
        }
        debug!(
            timestamp,
            price,
            quantity = fill.quantity,
            %reason,
            "closed position"
        );

        let commission = position.entry_commission + fill.commission;
        self.closed_trades.push(ClosedTrade {
            open_timestamp: position.open_timestamp,
            close_timestamp: timestamp,
            quantity: position.quantity,
            entry_price: position.acquisition_price,
            exit_price: price,
            commission,
            pnl: position.unrealized_pnl(price) - commission,
            reason,
        });
    }

    fn record_equity(&mut self, timestamp: i64, equity: f64) {
        self.equity_curve.push(EquityPoint { timestamp, equity });
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn quantity(&self) -> f64 {
        self.positions.iter().map(|p| p.quantity).sum()
    }

    /// Open quantity marked at the last valid price.
    pub fn holdings_value(&self) -> f64 {
        self.last_price
            .map(|price| self.quantity() * price)
            .unwrap_or(0.0)
    }

    pub fn total_value(&self) -> f64 {
        self.cash + self.holdings_value()
    }

    pub fn closed_trades(&self) -> &[ClosedTrade] {
        &self.closed_trades
    }

    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    pub fn init_timestamp(&self) -> Option<i64> {
        self.init_timestamp
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    pub fn total_commission(&self) -> f64 {
        self.total_commission
    }

    /// Executed fills: every buy and every liquidated position.
    pub fn trade_count(&self) -> usize {
        self.trade_count
    }

    pub fn stop_loss_count(&self) -> usize {
        self.stop_loss_count
    }

    pub fn take_profit_count(&self) -> usize {
        self.take_profit_count
    }

    pub fn metrics(&self) -> Option<Metrics> {
        Metrics::compute(&self.equity_curve)
    }

    pub fn trade_stats(&self) -> TradeStats {
        TradeStats::compute(&self.closed_trades)
    }

    pub fn buy_and_hold(&self) -> Option<BuyAndHold> {
        match (
            self.init_timestamp,
            self.init_price,
            self.last_timestamp,
            self.last_price,
        ) {
            (Some(first_ts), Some(init_price), Some(last_ts), Some(last_price)) => {
                Some(BuyAndHold::compute(
                    self.config.initial_cash,
                    init_price,
                    last_price,
                    first_ts,
                    last_ts,
                ))
            }
            _ => None,
        }
    }

    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            init_timestamp: self.init_timestamp,
            last_timestamp: self.last_timestamp,
            initial_cash: self.config.initial_cash,
            cash: self.cash,
            quantity: self.quantity(),
            holdings_value: self.holdings_value(),
            total_value: self.total_value(),
            total_commission: self.total_commission,
            trade_count: self.trade_count,
            stop_loss_count: self.stop_loss_count,
            take_profit_count: self.take_profit_count,
            metrics: self.metrics(),
            trade_stats: self.trade_stats(),
            buy_and_hold: self.buy_and_hold(),
        }
    }
}

/// Point-in-time view of a [`Portfolio`] for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub init_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub initial_cash: f64,
    pub cash: f64,
    pub quantity: f64,
    pub holdings_value: f64,
    pub total_value: f64,
    pub total_commission: f64,
    pub trade_count: usize,
    pub stop_loss_count: usize,
    pub take_profit_count: usize,
    pub metrics: Option<Metrics>,
    pub trade_stats: TradeStats,
    pub buy_and_hold: Option<BuyAndHold>,
}

fn format_timestamp(ts: Option<i64>) -> String {
    match ts {
        Some(ts) => match DateTime::from_timestamp(ts, 0) {
            Some(dt) => format!("{} ({})", dt.format("%Y-%m-%d %H:%M:%S"), ts),
            None => ts.to_string(),
        },
        None => "-".to_string(),
    }
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for PortfolioSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "first timestamp:   {}", format_timestamp(self.init_timestamp))?;
        writeln!(f, "last timestamp:    {}", format_timestamp(self.last_timestamp))?;
        writeln!(f, "initial cash:      {:.2}", self.initial_cash)?;
        writeln!(f, "cash:              {:.2}", self.cash)?;
        writeln!(f, "quantity:          {}", self.quantity)?;
        writeln!(f, "holdings value:    {:.2}", self.holdings_value)?;
        writeln!(f, "total value:       {:.2}", self.total_value)?;
        writeln!(f, "transaction costs: {:.2}", self.total_commission)?;
        writeln!(
            f,
            "trades:            {} (stop-loss {}, take-profit {})",
            self.trade_count, self.stop_loss_count, self.take_profit_count
        )?;
        writeln!(
            f,
            "closed trades:     {} won, {} lost, {} even (win rate {})",
            self.trade_stats.trades_won,
            self.trade_stats.trades_lost,
            self.trade_stats.trades_breakeven,
            format_pct(Some(self.trade_stats.win_rate))
        )?;
        match &self.metrics {
            Some(m) => {
                writeln!(f, "total return:      {}", format_pct(Some(m.total_return)))?;
                writeln!(f, "annualized return: {}", format_pct(m.annualized_return))?;
                writeln!(f, "max drawdown:      {}", format_pct(Some(m.max_drawdown)))?;
                writeln!(f, "sharpe ratio:      {:.4}", m.sharpe_ratio)?;
            }
            None => writeln!(f, "metrics:           n/a")?,
        }
        match &self.buy_and_hold {
            Some(bh) => write!(
                f,
                "buy & hold:        value {:.2}, return {}, annualized {}",
                bh.final_value,
                format_pct(Some(bh.total_return)),
                format_pct(bh.annualized_return)
            ),
            None => write!(f, "buy & hold:        n/a"),
        }
    }
}
