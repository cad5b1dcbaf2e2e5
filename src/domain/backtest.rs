//! Backtest runner: one record stream, one strategy, one portfolio.

use std::io::Write;

use tracing::debug;

use super::error::TzuError;
use super::ohlcv::Record;
use super::portfolio::{Portfolio, PortfolioSnapshot};
use super::strategy::Strategy;

/// Counters gathered while a [`Backtest`] consumes its records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub signals: usize,
}

#[derive(Debug, Clone)]
pub struct Backtest {
    strategy: Strategy,
    portfolio: Portfolio,
}

impl Backtest {
    pub fn new(strategy: Strategy, portfolio: Portfolio) -> Self {
        Backtest {
            strategy,
            portfolio,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn into_portfolio(self) -> Portfolio {
        self.portfolio
    }

    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.portfolio.snapshot()
    }

    /// Feeds every record through the strategy into the portfolio.
    ///
    /// Hold signals reach the portfolio too, so stop-loss/take-profit checks
    /// and the equity curve cover every record. With `verbose` the snapshot is
    /// written after each Buy/Sell signal; otherwise once after the last
    /// record.
    pub fn run<I, W>(
        &mut self,
        records: I,
        verbose: bool,
        out: &mut W,
    ) -> Result<RunSummary, TzuError>
    where
        I: IntoIterator<Item = Record>,
        W: Write,
    {
        let mut summary = RunSummary::default();
        for record in records {
            let signal = self.strategy.update(&record)?;
            summary.records += 1;
            self.portfolio.update(&signal);

            if signal.is_hold() {
                continue;
            }
            summary.signals += 1;
            debug!(
                timestamp = signal.timestamp,
                side = %signal.side,
                price = signal.price,
                "signal"
            );
            if verbose {
                writeln!(out, "{} {} @ {}", signal.timestamp, signal.side, signal.price)?;
                writeln!(out, "{}", self.portfolio.snapshot())?;
                writeln!(out)?;
            }
        }
        if !verbose {
            writeln!(out, "{}", self.portfolio.snapshot())?;
        }
        Ok(summary)
    }
}
