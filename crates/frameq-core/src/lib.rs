//! frameq core - frame scanning and queued batch loading.
//!
//! This crate contains the domain types, the port traits adapters implement,
//! the frame validity scanner and the stateful queued batch loader that a
//! node-graph host ticks once per graph execution.

pub mod domain;
pub mod error;
pub mod frame;
pub mod loader;
pub mod ports;
pub mod scan;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{
    BatchSummary, Cacheability, FrameBatch, FrameRef, InstanceId, LoadOutput, LoadRequest,
    NodeDescriptor,
};
pub use error::{ErrorKind, LoadError};
pub use loader::{LoaderConfig, QueuedBatchLoader};
pub use ports::{BatchOutput, FrameStore, ProgressEvent, ProgressSink};
pub use scan::{find_valid_frames, scan_backward, scan_forward, DEFAULT_EXTENSIONS};
