//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the loader core and external adapters.

mod batch_output;
mod frame_store;
mod progress;

pub use batch_output::BatchOutput;
pub use frame_store::FrameStore;
pub use progress::{ProgressEvent, ProgressSink};
