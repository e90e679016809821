//! Loaded batch and per-call output types.

use candle_core::Tensor;
use serde::{Deserialize, Serialize};

/// A frame chosen for a batch: its position in the sorted listing and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRef {
    /// Index into the sorted directory listing.
    pub index: usize,
    /// File name within the directory.
    pub name: String,
}

impl FrameRef {
    /// Creates a frame reference.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Decoded frames concatenated along the batch dimension.
///
/// The tensor is `f32` with shape `(N, H, W, 3)` and values in `[0, 1]`.
/// `frames` lists the source of each slice along dimension 0.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    tensor: Tensor,
    frames: Vec<FrameRef>,
}

impl FrameBatch {
    /// Creates a batch from an already concatenated tensor.
    #[must_use]
    pub fn new(tensor: Tensor, frames: Vec<FrameRef>) -> Self {
        Self { tensor, frames }
    }

    /// Returns the batch tensor.
    #[must_use]
    pub const fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Returns the frames in batch order.
    #[must_use]
    pub fn frames(&self) -> &[FrameRef] {
        &self.frames
    }

    /// Number of frames in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the batch holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Tensor shape as `[N, H, W, C]`.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.tensor.dims().to_vec()
    }
}

/// Result of one loader invocation.
#[derive(Debug, Clone)]
pub struct LoadOutput {
    /// Pre-frame (if any) followed by the new frames.
    pub images: FrameBatch,
    /// Whether a pre-frame was prepended.
    pub pre_framed: bool,
    /// Cursor as it was before this call loaded anything.
    pub cursor_before: usize,
    /// Whether more valid frames remain after this batch.
    pub has_next: bool,
}

impl LoadOutput {
    /// Pre-frame flag in the host's integer form.
    #[must_use]
    pub const fn preframe_flag(&self) -> u8 {
        if self.pre_framed {
            1
        } else {
            0
        }
    }

    /// Serializable summary without pixel data.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            frames: self.images.frames().to_vec(),
            shape: self.images.shape(),
            pre_framed: self.preframe_flag(),
            cursor_before: self.cursor_before,
            has_next: self.has_next,
        }
    }
}

/// Pixel-free description of a loaded batch, used for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Frames in batch order.
    pub frames: Vec<FrameRef>,
    /// Tensor shape `[N, H, W, C]`.
    pub shape: Vec<usize>,
    /// 1 if a pre-frame leads the batch, else 0.
    pub pre_framed: u8,
    /// Cursor before the load.
    pub cursor_before: usize,
    /// Whether more frames remain.
    pub has_next: bool,
}
