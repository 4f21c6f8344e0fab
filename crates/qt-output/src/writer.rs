//! The `OutputWriter` trait implemented by backend writers.

use crate::{MetricsRow, NodeResultRow, OutputResult, PipeResultRow};

/// Sink for per-run results.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write one run's pipe rows.
    fn write_pipes(&mut self, rows: &[PipeResultRow]) -> OutputResult<()>;

    /// Write one run's node rows.
    fn write_nodes(&mut self, rows: &[NodeResultRow]) -> OutputResult<()>;

    /// Write one run's metrics row.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
