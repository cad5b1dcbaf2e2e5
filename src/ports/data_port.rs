//! Record source port.

use crate::domain::error::TzuError;
use crate::domain::ohlcv::{DataKind, Record};

/// Lazy, forward-only sequence of records.
pub type RecordStream = Box<dyn Iterator<Item = Record>>;

pub trait DataPort {
    /// Shape of every record this source yields.
    fn kind(&self) -> DataKind;

    /// Opens the source from its first row. Calling it again restarts the
    /// sequence. Malformed rows are skipped, not surfaced.
    fn stream(&self) -> Result<RecordStream, TzuError>;
}
