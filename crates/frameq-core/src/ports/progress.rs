//! Progress reporting port for UI integration.

use crate::domain::BatchSummary;

/// Events emitted while draining a directory batch by batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Draining started.
    Started {
        /// Directory as requested.
        directory: String,
        /// Number of candidate files, if known.
        total: Option<usize>,
    },
    /// One batch was loaded.
    BatchLoaded {
        /// Batch number (0-based).
        batch: usize,
        /// The loaded batch.
        summary: BatchSummary,
    },
    /// No further batches.
    Finished {
        /// Batches loaded.
        batches: usize,
        /// New frames loaded, pre-frames excluded.
        frames: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
