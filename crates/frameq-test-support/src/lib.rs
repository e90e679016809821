//! Test support utilities for frameq.
//!
//! Provides mocks, synthetic frame builders, and on-disk frame directories
//! for testing the scanner and the queued batch loader.
//!
//! # Example
//!
//! ```
//! use frameq_test_support::{FrameDirBuilder, MockFrameStore};
//!
//! // In-memory directory with 10 valid frames and a corrupt one
//! let store = MockFrameStore::with_frames("shots", 10).corrupt("shots", "broken.png");
//!
//! // Real PNG files on disk
//! let dir = FrameDirBuilder::new().frames(3).build();
//! assert!(dir.path().join("frame_0002.png").exists());
//! ```

mod builders;
mod mocks;

pub use builders::{frame_value, FrameDirBuilder, SyntheticFrameBuilder};
pub use mocks::{MockBatchOutput, MockFrameStore, MockProgressSink};
