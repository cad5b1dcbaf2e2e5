//! Performance metrics derived from the equity curve and closed trades.
//!
//! Timestamps are seconds; a year is 365 days. Annualized figures need at
//! least 30 days of history and are `None` below that. Returns are measured
//! against a zero risk-free rate.

use super::portfolio::EquityPoint;
use super::position::ClosedTrade;

pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;
pub const MIN_ANNUALIZATION_YEARS: f64 = 30.0 / 365.0;

pub fn elapsed_years(first_timestamp: i64, last_timestamp: i64) -> f64 {
    (last_timestamp - first_timestamp) as f64 / SECONDS_PER_YEAR
}

/// (growth)^(1/years) - 1, or `None` when the horizon is under 30 days.
pub fn annualize(growth: f64, years: f64) -> Option<f64> {
    if years >= MIN_ANNUALIZATION_YEARS {
        Some(growth.powf(1.0 / years) - 1.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return: f64,
    pub annualized_return: Option<f64>,
    pub max_drawdown: f64,
    /// Longest run of equity points spent below a previous peak.
    pub max_drawdown_duration: usize,
    pub sharpe_ratio: f64,
    pub elapsed_years: f64,
}

impl Metrics {
    /// `None` for an empty curve.
    pub fn compute(equity_curve: &[EquityPoint]) -> Option<Self> {
        let first = equity_curve.first()?;
        let last = equity_curve.last()?;

        let growth = if first.equity > 0.0 {
            last.equity / first.equity
        } else {
            1.0
        };
        let years = elapsed_years(first.timestamp, last.timestamp);
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(equity_curve);

        Some(Metrics {
            total_return: growth - 1.0,
            annualized_return: annualize(growth, years),
            max_drawdown,
            max_drawdown_duration,
            sharpe_ratio: compute_sharpe(equity_curve, years),
            elapsed_years: years,
        })
    }
}

fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, usize) {
    if equity_curve.is_empty() {
        return (0.0, 0);
    }

    let mut peak = equity_curve[0].equity;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}

fn compute_sharpe(equity_curve: &[EquityPoint], years: f64) -> f64 {
    if equity_curve.len() < 2 || years <= 0.0 {
        return 0.0;
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| {
            let prev = w[0].equity;
            let curr = w[1].equity;
            if prev > 0.0 { curr / prev - 1.0 } else { 0.0 }
        })
        .collect();

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        let samples_per_year = n / years;
        mean * samples_per_year.sqrt() / stddev
    } else {
        0.0
    }
}

/// Win/loss statistics over closed trades.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeStats {
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
}

impl TradeStats {
    pub fn compute(trades: &[ClosedTrade]) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for trade in trades {
            let pnl = trade.pnl;
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
                largest_win = largest_win.max(pnl);
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl.abs();
                largest_loss = largest_loss.max(pnl.abs());
            } else {
                trades_breakeven += 1;
            }
        }

        let total_trades = trades.len();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        TradeStats {
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            profit_factor,
            avg_win: if trades_won > 0 {
                total_wins / trades_won as f64
            } else {
                0.0
            },
            avg_loss: if trades_lost > 0 {
                total_losses / trades_lost as f64
            } else {
                0.0
            },
            largest_win,
            largest_loss,
        }
    }
}

/// Benchmark: spend the initial cash on whole units at the first valid
/// price and hold them to the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyAndHold {
    pub quantity: f64,
    pub leftover_cash: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub annualized_return: Option<f64>,
}

impl BuyAndHold {
    pub fn compute(
        initial_cash: f64,
        init_price: f64,
        last_price: f64,
        first_timestamp: i64,
        last_timestamp: i64,
    ) -> Self {
        let quantity = if init_price > 0.0 {
            (initial_cash / init_price).floor()
        } else {
            0.0
        };
        let leftover_cash = initial_cash - quantity * init_price;
        let final_value = quantity * last_price + leftover_cash;
        let growth = if initial_cash > 0.0 {
            final_value / initial_cash
        } else {
            1.0
        };

        BuyAndHold {
            quantity,
            leftover_cash,
            final_value,
            total_return: growth - 1.0,
            annualized_return: annualize(
                growth,
                elapsed_years(first_timestamp, last_timestamp),
            ),
        }
    }
}
