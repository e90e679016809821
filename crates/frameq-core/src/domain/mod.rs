//! Core domain types for queued batch loading.

mod batch;
mod instance;
mod node;
mod request;

pub use batch::{BatchSummary, FrameBatch, FrameRef, LoadOutput};
pub use instance::InstanceId;
pub use node::{
    Cacheability, InputGroup, InputKind, InputSpec, NodeDescriptor, OutputKind, OutputSpec,
};
pub use request::{defaults, LoadRequest};
