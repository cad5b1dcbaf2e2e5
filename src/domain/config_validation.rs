//! Configuration validation.
//!
//! Checks every `[data]`, `[backtest]` and `[strategy]` key before any
//! component is built. The typed readers are shared with the CLI builders so
//! a value that validates is parsed the same way when it is used.

use std::str::FromStr;

use crate::domain::error::TzuError;
use crate::domain::ohlcv::{DataKind, OhlcvField};
use crate::domain::portfolio::DEFAULT_INITIAL_CASH;
use crate::domain::strategy::{MovingAverageKind, StrategyKind};
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), TzuError> {
    validate_data_kind(config)?;
    validate_initial_cash(config)?;
    validate_transaction_cost(config)?;
    validate_stop_loss(config)?;
    validate_take_profit(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), TzuError> {
    match read_strategy_kind(config)? {
        StrategyKind::Crossover => validate_crossover(config),
        StrategyKind::Rsi => validate_rsi(config),
        StrategyKind::Macd => validate_macd(config),
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TzuError {
    TzuError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn missing(section: &str, key: &str) -> TzuError {
    TzuError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn non_blank(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn read_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, TzuError> {
    Ok(read_optional_double(config, section, key)?.unwrap_or(default))
}

pub(crate) fn read_optional_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, TzuError> {
    match config.get_optional_double(section, key) {
        None => Ok(None),
        Some(Ok(v)) if v.is_finite() => Ok(Some(v)),
        Some(Ok(_)) => Err(invalid(section, key, "must be a finite number")),
        Some(Err(raw)) => Err(invalid(section, key, format!("'{raw}' is not a number"))),
    }
}

/// Window lengths: a positive integer, or `default` when absent.
pub(crate) fn read_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: Option<usize>,
) -> Result<usize, TzuError> {
    let Some(raw) = non_blank(config, section, key) else {
        return default.ok_or_else(|| missing(section, key));
    };
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(invalid(section, key, "must be a positive integer")),
    }
}

pub(crate) fn read_parsed<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, TzuError>
where
    T: FromStr<Err = String>,
{
    match non_blank(config, section, key) {
        Some(raw) => raw.parse().map_err(|reason| invalid(section, key, reason)),
        None => Ok(default),
    }
}

pub(crate) fn read_strategy_kind(config: &dyn ConfigPort) -> Result<StrategyKind, TzuError> {
    let raw = non_blank(config, "strategy", "type").ok_or_else(|| missing("strategy", "type"))?;
    raw.parse()
        .map_err(|reason| invalid("strategy", "type", reason))
}

/// `None` lets the strategy's required kind decide.
pub(crate) fn read_data_kind(config: &dyn ConfigPort) -> Result<Option<DataKind>, TzuError> {
    match non_blank(config, "data", "kind") {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|reason| invalid("data", "kind", reason)),
        None => Ok(None),
    }
}

fn validate_data_kind(config: &dyn ConfigPort) -> Result<(), TzuError> {
    read_data_kind(config).map(|_| ())
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), TzuError> {
    let value = read_double(config, "backtest", "initial_cash", DEFAULT_INITIAL_CASH)?;
    if value <= 0.0 {
        return Err(invalid(
            "backtest",
            "initial_cash",
            "initial_cash must be positive",
        ));
    }
    Ok(())
}

fn validate_transaction_cost(config: &dyn ConfigPort) -> Result<(), TzuError> {
    let value = read_double(config, "backtest", "transaction_cost", 0.0)?;
    if value < 0.0 {
        return Err(invalid(
            "backtest",
            "transaction_cost",
            "transaction_cost must be non-negative",
        ));
    }
    Ok(())
}

fn validate_stop_loss(config: &dyn ConfigPort) -> Result<(), TzuError> {
    if let Some(value) = read_optional_double(config, "backtest", "stop_loss")? {
        if value <= 0.0 || value >= 1.0 {
            return Err(invalid(
                "backtest",
                "stop_loss",
                "stop_loss must be between 0 and 1",
            ));
        }
    }
    Ok(())
}

fn validate_take_profit(config: &dyn ConfigPort) -> Result<(), TzuError> {
    if let Some(value) = read_optional_double(config, "backtest", "take_profit")? {
        if value <= 0.0 {
            return Err(invalid(
                "backtest",
                "take_profit",
                "take_profit must be positive",
            ));
        }
    }
    Ok(())
}

fn validate_threshold(config: &dyn ConfigPort) -> Result<(), TzuError> {
    let value = read_double(config, "strategy", "threshold", 0.0)?;
    if value < 0.0 {
        return Err(invalid(
            "strategy",
            "threshold",
            "threshold must be non-negative",
        ));
    }
    Ok(())
}

fn validate_crossover(config: &dyn ConfigPort) -> Result<(), TzuError> {
    read_period(config, "strategy", "short_period", None)?;
    read_period(config, "strategy", "long_period", None)?;
    read_parsed(config, "strategy", "average", MovingAverageKind::default())?;
    validate_threshold(config)
}

fn validate_rsi(config: &dyn ConfigPort) -> Result<(), TzuError> {
    use crate::domain::indicator::rsi::DEFAULT_PERIOD;
    use crate::domain::strategy::rsi::{DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD};

    read_period(config, "strategy", "period", Some(DEFAULT_PERIOD))?;
    read_parsed(config, "strategy", "field", OhlcvField::default())?;
    let oversold = read_double(config, "strategy", "oversold", DEFAULT_OVERSOLD)?;
    let overbought = read_double(config, "strategy", "overbought", DEFAULT_OVERBOUGHT)?;
    for (key, value) in [("oversold", oversold), ("overbought", overbought)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid(
                "strategy",
                key,
                format!("{key} must be between 0 and 100"),
            ));
        }
    }
    if oversold >= overbought {
        return Err(invalid(
            "strategy",
            "oversold",
            "oversold must be below overbought",
        ));
    }
    Ok(())
}

fn validate_macd(config: &dyn ConfigPort) -> Result<(), TzuError> {
    use crate::domain::indicator::ema::DEFAULT_SMOOTHING;
    use crate::domain::indicator::macd::{DEFAULT_LONG, DEFAULT_SHORT, DEFAULT_SIGNAL};

    read_period(config, "strategy", "short_period", Some(DEFAULT_SHORT))?;
    read_period(config, "strategy", "long_period", Some(DEFAULT_LONG))?;
    read_period(config, "strategy", "signal_period", Some(DEFAULT_SIGNAL))?;
    let smoothing = read_double(config, "strategy", "smoothing", DEFAULT_SMOOTHING)?;
    if smoothing <= 0.0 {
        return Err(invalid(
            "strategy",
            "smoothing",
            "smoothing must be positive",
        ));
    }
    validate_threshold(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn invalid_key(err: TzuError) -> String {
        match err {
            TzuError::ConfigInvalid { key, .. } => key,
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn valid_backtest_config_passes() {
        let config = make_config(
            r#"
[data]
path = prices.csv
kind = ohlcv

[backtest]
initial_cash = 100000.0
transaction_cost = 0.001
stop_loss = 0.1
take_profit = 0.25
"#,
        );
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn defaults_pass() {
        let config = make_config("[backtest]\n");
        assert!(validate_backtest_config(&config).is_ok());
    }

    #[test]
    fn initial_cash_must_be_positive() {
        let config = make_config("[backtest]\ninitial_cash = 0\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "initial_cash");
    }

    #[test]
    fn non_numeric_cash_is_rejected() {
        let config = make_config("[backtest]\ninitial_cash = lots\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "initial_cash");
    }

    #[test]
    fn negative_transaction_cost_fails() {
        let config = make_config("[backtest]\ntransaction_cost = -0.01\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "transaction_cost");
    }

    #[test]
    fn stop_loss_out_of_range_fails() {
        for value in ["0", "1", "1.5", "-0.1"] {
            let config = make_config(&format!("[backtest]\nstop_loss = {value}\n"));
            let err = validate_backtest_config(&config).unwrap_err();
            assert_eq!(invalid_key(err), "stop_loss");
        }
    }

    #[test]
    fn take_profit_must_be_positive() {
        let config = make_config("[backtest]\ntake_profit = 0\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "take_profit");
    }

    #[test]
    fn unknown_data_kind_fails() {
        let config = make_config("[data]\nkind = candles\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "kind");
    }

    #[test]
    fn missing_strategy_type_fails() {
        let config = make_config("[strategy]\nperiod = 14\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, TzuError::ConfigMissing { key, .. } if key == "type"));
    }

    #[test]
    fn unknown_strategy_type_fails() {
        let config = make_config("[strategy]\ntype = momentum\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert_eq!(invalid_key(err), "type");
    }

    #[test]
    fn crossover_requires_periods() {
        let config = make_config("[strategy]\ntype = crossover\nshort_period = 5\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, TzuError::ConfigMissing { key, .. } if key == "long_period"));

        let config = make_config(
            "[strategy]\ntype = crossover\nshort_period = 5\nlong_period = 20\naverage = ema\n",
        );
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn crossover_rejects_zero_period_and_unknown_average() {
        let config =
            make_config("[strategy]\ntype = crossover\nshort_period = 0\nlong_period = 20\n");
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "short_period"
        );

        let config = make_config(
            "[strategy]\ntype = crossover\nshort_period = 5\nlong_period = 20\naverage = wma\n",
        );
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "average"
        );
    }

    #[test]
    fn crossover_negative_threshold_fails() {
        let config = make_config(
            "[strategy]\ntype = crossover\nshort_period = 5\nlong_period = 20\nthreshold = -0.1\n",
        );
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "threshold"
        );
    }

    #[test]
    fn rsi_defaults_pass() {
        let config = make_config("[strategy]\ntype = rsi\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn rsi_levels_checked() {
        let config = make_config("[strategy]\ntype = rsi\noversold = 80\noverbought = 70\n");
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "oversold"
        );

        let config = make_config("[strategy]\ntype = rsi\noverbought = 120\n");
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "overbought"
        );
    }

    #[test]
    fn rsi_field_checked() {
        let config = make_config("[strategy]\ntype = rsi\nfield = vwap\n");
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "field"
        );
    }

    #[test]
    fn macd_defaults_pass() {
        let config = make_config("[strategy]\ntype = macd\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn macd_smoothing_must_be_positive() {
        let config = make_config("[strategy]\ntype = macd\nsmoothing = 0\n");
        assert_eq!(
            invalid_key(validate_strategy_config(&config).unwrap_err()),
            "smoothing"
        );
    }

    #[test]
    fn read_period_uses_default() {
        let config = make_config("[strategy]\n");
        assert_eq!(read_period(&config, "strategy", "period", Some(14)).unwrap(), 14);
    }
}
