//! Domain error types.

use crate::domain::ohlcv::DataKind;

/// Top-level error type for tzutrader.
///
/// Warm-up and malformed input rows are not errors: the former is carried as
/// `None` through indicators and strategies, the latter is skipped by the
/// record source.
#[derive(Debug, thiserror::Error)]
pub enum TzuError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("strategy consumes {expected} records but the source yields {found}")]
    DataKindMismatch { expected: DataKind, found: DataKind },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TzuError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        TzuError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&TzuError> for std::process::ExitCode {
    fn from(err: &TzuError) -> Self {
        let code: u8 = match err {
            TzuError::Io(_) => 1,
            TzuError::ConfigParse { .. }
            | TzuError::ConfigMissing { .. }
            | TzuError::ConfigInvalid { .. } => 2,
            TzuError::DataSource { .. } => 3,
            TzuError::InvalidParameter { .. } | TzuError::DataKindMismatch { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
