//! Batch output port for writing batch summaries.

use crate::domain::BatchSummary;

/// Port for outputting batch summaries.
pub trait BatchOutput: Send + Sync {
    /// Writes a single batch summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, summary: &BatchSummary) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
