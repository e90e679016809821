//! JSON output adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use frameq_core::{BatchOutput, BatchSummary};
use serde::Serialize;

/// JSON output adapter.
///
/// Batch summaries are written as JSON Lines, or, in array mode, collected
/// and written as one JSON array on `flush()`.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    array: Option<Mutex<Vec<BatchSummary>>>,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            array: None,
            pretty: false,
        }
    }

    /// Switches to array mode: summaries are buffered until `flush()`.
    #[must_use]
    pub fn into_array(mut self, pretty: bool) -> Self {
        self.array = Some(Mutex::new(Vec::new()));
        self.pretty = pretty;
        self
    }

    /// Writes one value as a single JSON document.
    pub fn write_value<T: Serialize + ?Sized>(&self, value: &T, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        self.write_line(&json)
    }

    /// Writes a batch of summaries as a JSON array.
    pub fn write_array(&self, summaries: &[BatchSummary], pretty: bool) -> Result<()> {
        self.write_value(summaries, pretty)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

impl BatchOutput for JsonOutput {
    fn write(&self, summary: &BatchSummary) -> Result<()> {
        if let Some(array) = &self.array {
            array
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                .push(summary.clone());
            return Ok(());
        }
        let json = serde_json::to_string(summary)?;
        self.write_line(&json)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let Some(array) = &self.array {
            let summaries = std::mem::take(
                &mut *array
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            self.write_array(&summaries, self.pretty)?;
        }
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
