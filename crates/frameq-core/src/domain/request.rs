//! Per-invocation load request.

use super::InstanceId;

/// Default values for the optional node inputs.
pub mod defaults {
    /// New frames per call, excluding the pre-frame.
    pub const BATCH_SIZE: usize = 8;
    /// Prepend the frame before the cursor.
    pub const PRE_FRAME: bool = true;
    /// Reposition the cursor before loading.
    pub const RESET: bool = false;
    /// Valid-frame ordinal the cursor is reset to.
    pub const RESET_START_AT: usize = 0;
}

/// Inputs for one invocation of the queued batch loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Directory relative to the loader's input root.
    pub directory: String,
    /// Number of new frames to return (must be at least 1).
    pub batch_size: usize,
    /// Whether to prepend the frame immediately before the cursor.
    pub pre_frame: bool,
    /// Whether to reposition the cursor before loading.
    pub reset: bool,
    /// Zero-based valid-frame ordinal to reset to.
    pub reset_start_at: usize,
    /// Identity of the calling node instance.
    pub instance: InstanceId,
}

impl LoadRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(directory: impl Into<String>, instance: impl Into<InstanceId>) -> Self {
        Self {
            directory: directory.into(),
            batch_size: defaults::BATCH_SIZE,
            pre_frame: defaults::PRE_FRAME,
            reset: defaults::RESET,
            reset_start_at: defaults::RESET_START_AT,
            instance: instance.into(),
        }
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enables or disables the pre-frame.
    #[must_use]
    pub const fn with_pre_frame(mut self, pre_frame: bool) -> Self {
        self.pre_frame = pre_frame;
        self
    }

    /// Requests a cursor reset to the given valid-frame ordinal.
    #[must_use]
    pub const fn with_reset(mut self, start_at: usize) -> Self {
        self.reset = true;
        self.reset_start_at = start_at;
        self
    }
}
