//! frameq Adapters - External adapters for frameq.
//!
//! This crate provides adapters for:
//! - Filesystem frame store

pub mod fs;

pub use fs::FsFrameStore;
