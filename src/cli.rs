//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{Backtest, RunSummary};
use crate::domain::config_validation::{
    read_data_kind, read_double, read_optional_double, read_parsed, read_period,
    read_strategy_kind, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::TzuError;
use crate::domain::indicator::ema::DEFAULT_SMOOTHING;
use crate::domain::indicator::{macd, rsi};
use crate::domain::ohlcv::{DataKind, OhlcvField};
use crate::domain::portfolio::{Portfolio, PortfolioConfig, DEFAULT_INITIAL_CASH};
use crate::domain::strategy::rsi::{DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD};
use crate::domain::strategy::{
    Crossover, MacdStrategy, MovingAverageKind, RsiStrategy, Strategy, StrategyKind,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "tzutrader", about = "Indicator strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// CSV record source, `-` for stdin; overrides [data] path
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Print the portfolio after every buy/sell signal
        #[arg(short, long)]
        verbose: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            data,
            verbose,
        } => run_backtest(&config, data.as_deref(), verbose),
        Command::Validate { config } => run_validate(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TzuError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

fn run_backtest(config_path: &Path, data: Option<&Path>, verbose: bool) -> Result<(), TzuError> {
    let adapter = load_config(config_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_backtest_pipeline(&adapter, data, verbose, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TzuError> {
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;

    let strategy = build_strategy(&adapter)?;
    let portfolio = build_portfolio_config(&adapter)?;
    portfolio.validate()?;
    if let Some(kind) = read_data_kind(&adapter)? {
        check_wiring(&strategy, kind)?;
    }

    println!("strategy:  {}", strategy.name());
    println!("consumes:  {}", strategy.required_data());
    println!("cash:      {:.2}", portfolio.initial_cash);
    println!("Configuration is valid.");
    Ok(())
}

/// Validates `config`, wires source → strategy → portfolio and writes the
/// report to `out`. `data` and `verbose` override the file's settings.
pub fn run_backtest_pipeline<W: Write>(
    config: &dyn ConfigPort,
    data: Option<&Path>,
    verbose: bool,
    out: &mut W,
) -> Result<RunSummary, TzuError> {
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;

    let strategy = build_strategy(config)?;
    let portfolio = Portfolio::new(build_portfolio_config(config)?)?;
    let source = build_data_source(config, data, strategy.required_data())?;
    let verbose = verbose || config.get_bool("backtest", "verbose", false);

    info!(
        strategy = %strategy.name(),
        source = %source.path().display(),
        kind = %source.kind(),
        "starting backtest"
    );
    let mut backtest = Backtest::new(strategy, portfolio);
    let summary = backtest.run(source.stream()?, verbose, out)?;
    info!(
        records = summary.records,
        signals = summary.signals,
        trades = backtest.portfolio().trade_count(),
        "backtest complete"
    );
    Ok(summary)
}

pub fn build_portfolio_config(config: &dyn ConfigPort) -> Result<PortfolioConfig, TzuError> {
    Ok(PortfolioConfig {
        initial_cash: read_double(config, "backtest", "initial_cash", DEFAULT_INITIAL_CASH)?,
        transaction_cost: read_double(config, "backtest", "transaction_cost", 0.0)?,
        stop_loss: read_optional_double(config, "backtest", "stop_loss")?,
        take_profit: read_optional_double(config, "backtest", "take_profit")?,
    })
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<Strategy, TzuError> {
    let threshold = read_double(config, "strategy", "threshold", 0.0)?;
    let strategy = match read_strategy_kind(config)? {
        StrategyKind::Crossover => Crossover::new(
            read_parsed(config, "strategy", "average", MovingAverageKind::default())?,
            read_period(config, "strategy", "short_period", None)?,
            read_period(config, "strategy", "long_period", None)?,
            threshold,
        )?
        .into(),
        StrategyKind::Rsi => RsiStrategy::new(
            read_period(config, "strategy", "period", Some(rsi::DEFAULT_PERIOD))?,
            read_double(config, "strategy", "oversold", DEFAULT_OVERSOLD)?,
            read_double(config, "strategy", "overbought", DEFAULT_OVERBOUGHT)?,
            read_parsed(config, "strategy", "field", OhlcvField::default())?,
        )?
        .into(),
        StrategyKind::Macd => MacdStrategy::new(
            read_period(config, "strategy", "short_period", Some(macd::DEFAULT_SHORT))?,
            read_period(config, "strategy", "long_period", Some(macd::DEFAULT_LONG))?,
            read_period(config, "strategy", "signal_period", Some(macd::DEFAULT_SIGNAL))?,
            read_double(config, "strategy", "smoothing", DEFAULT_SMOOTHING)?,
            threshold,
        )?
        .into(),
    };
    Ok(strategy)
}

/// Resolves the record source. The path comes from `data_override` or
/// `[data] path`; the record kind defaults to what the strategy consumes.
pub fn build_data_source(
    config: &dyn ConfigPort,
    data_override: Option<&Path>,
    required: DataKind,
) -> Result<CsvAdapter, TzuError> {
    let path = match data_override {
        Some(p) => p.to_path_buf(),
        None => config
            .get_string("data", "path")
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(p.trim()))
            .ok_or_else(|| TzuError::ConfigMissing {
                section: "data".to_string(),
                key: "path".to_string(),
            })?,
    };
    let kind = read_data_kind(config)?.unwrap_or(required);
    if kind != required {
        return Err(TzuError::DataKindMismatch {
            expected: required,
            found: kind,
        });
    }
    let has_headers = config.get_bool("data", "has_headers", true);
    Ok(CsvAdapter::new(path, kind, has_headers))
}

fn check_wiring(strategy: &Strategy, kind: DataKind) -> Result<(), TzuError> {
    if strategy.required_data() != kind {
        return Err(TzuError::DataKindMismatch {
            expected: strategy.required_data(),
            found: kind,
        });
    }
    Ok(())
}
