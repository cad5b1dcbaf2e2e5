//! Property tests over generated price paths.

mod common;

use common::*;
use proptest::prelude::*;
use tzutrader::domain::indicator::{Indicator, Sma};
use tzutrader::domain::metrics::Metrics;
use tzutrader::domain::ohlcv::{Ohlcv, OhlcvField, SingleValue};
use tzutrader::domain::portfolio::{EquityPoint, Portfolio, PortfolioConfig};
use tzutrader::domain::signal::{Side, Signal};
use tzutrader::domain::strategy::{Crossover, MacdStrategy, MovingAverageKind, RsiStrategy};

fn prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..500.0, 1..300)
}

fn assert_alternating(sides: &[Side]) -> Result<(), TestCaseError> {
    let mut last = Side::Hold;
    for &side in sides.iter().filter(|s| **s != Side::Hold) {
        prop_assert_ne!(side, last);
        last = side;
    }
    Ok(())
}

proptest! {
    #[test]
    fn sma_matches_brute_force(values in prices(), window in 1usize..20) {
        let mut sma = Sma::new(window).unwrap();
        for (i, &v) in values.iter().enumerate() {
            let out = sma.update(v);
            if i + 1 < window {
                prop_assert!(out.is_none());
            } else {
                let slice = &values[i + 1 - window..=i];
                let expected = slice.iter().sum::<f64>() / window as f64;
                let got = out.unwrap();
                prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }

    #[test]
    fn crossover_never_repeats_a_side(
        values in prices(),
        short in 1usize..8,
        extra in 1usize..20,
        threshold in 0.0f64..0.05,
        ema in any::<bool>(),
    ) {
        let kind = if ema { MovingAverageKind::Ema } else { MovingAverageKind::Sma };
        let mut strategy = Crossover::new(kind, short, short + extra, threshold).unwrap();
        let sides: Vec<Side> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| strategy.update(&SingleValue { timestamp: i as i64, value }).side)
            .collect();
        assert_alternating(&sides)?;
    }

    #[test]
    fn rsi_strategy_never_repeats_a_side(values in prices(), period in 1usize..15) {
        let mut strategy = RsiStrategy::new(period, 30.0, 70.0, OhlcvField::Close).unwrap();
        let mut prev = values[0];
        let mut sides = Vec::with_capacity(values.len());
        for (i, &close) in values.iter().enumerate() {
            let bar = Ohlcv::new(i as i64, prev, prev.max(close), prev.min(close), close, 1.0);
            sides.push(strategy.update(&bar).side);
            prev = close;
        }
        assert_alternating(&sides)?;
    }

    #[test]
    fn macd_strategy_never_repeats_a_side(values in prices()) {
        let mut strategy = MacdStrategy::new(3, 7, 4, 2.0, 0.0).unwrap();
        let sides: Vec<Side> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| strategy.update(&SingleValue { timestamp: i as i64, value }).side)
            .collect();
        assert_alternating(&sides)?;
    }

    #[test]
    fn cash_and_quantity_never_negative(
        steps in prop::collection::vec((0u8..3, 0.5f64..200.0), 1..200),
        cost in 0.0f64..0.05,
        stop_loss in prop::option::of(0.01f64..0.5),
        take_profit in prop::option::of(0.01f64..1.0),
    ) {
        let mut portfolio = Portfolio::new(PortfolioConfig {
            initial_cash: 10_000.0,
            transaction_cost: cost,
            stop_loss,
            take_profit,
        })
        .unwrap();
        for (i, &(side, price)) in steps.iter().enumerate() {
            let side = match side {
                0 => Side::Buy,
                1 => Side::Sell,
                _ => Side::Hold,
            };
            portfolio.update(&Signal::new(i as i64 * DAY, side, price));
            prop_assert!(portfolio.cash() >= 0.0);
            prop_assert!(portfolio.quantity() >= 0.0);
        }
        prop_assert_eq!(portfolio.equity_curve().len(), steps.len() + 1);
    }

    #[test]
    fn short_curves_are_never_annualized(
        equities in prop::collection::vec(1.0f64..1e6, 1..100),
        span in 0i64..(30 * DAY),
    ) {
        let n = equities.len() as i64;
        let curve: Vec<EquityPoint> = equities
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                timestamp: START + span * i as i64 / n.max(1),
                equity,
            })
            .collect();
        let metrics = Metrics::compute(&curve).unwrap();
        prop_assert!(metrics.annualized_return.is_none());
        prop_assert!(metrics.max_drawdown >= 0.0 && metrics.max_drawdown <= 1.0);
    }
}
