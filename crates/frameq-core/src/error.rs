//! Loader error types.

use std::path::PathBuf;

/// Boxed source error from an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad class of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or unusable directory; nothing was attempted.
    Configuration,
    /// Loading ran but nothing was left to return.
    Exhausted,
    /// A previously validated frame failed to decode.
    Decode,
}

/// Errors that abort a single loader invocation.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The resolved path is not a directory.
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound {
        /// Resolved directory path.
        path: PathBuf,
    },

    /// The requested directory climbs out of the input root.
    #[error("Directory escapes the input root: {requested}")]
    OutsideRoot {
        /// Directory as requested.
        requested: String,
    },

    /// The directory has no entries at all.
    #[error("No files found: {}", .path.display())]
    EmptyDirectory {
        /// Resolved directory path.
        path: PathBuf,
    },

    /// A reset was requested but the directory holds no valid frame.
    #[error("No valid frame to reset to (target {target}): {}", .path.display())]
    ResetTargetUnreachable {
        /// Resolved directory path.
        path: PathBuf,
        /// Requested valid-frame ordinal.
        target: usize,
    },

    /// Batch size was zero.
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// The directory could not be listed.
    #[error("Failed to list directory {}", .path.display())]
    Listing {
        /// Resolved directory path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },

    /// Nothing remained to return after scanning and trimming.
    #[error("No images could be loaded from directory '{}'", .path.display())]
    NoImagesLoaded {
        /// Resolved directory path.
        path: PathBuf,
    },

    /// A validated frame failed to decode.
    #[error("Failed to decode frame {}", .path.display())]
    Decode {
        /// Frame path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },

    /// Frames could not be turned into a batch tensor (e.g. mixed sizes).
    #[error("Failed to assemble frame batch")]
    Tensor(#[from] candle_core::Error),
}

impl LoadError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryNotFound { .. }
            | Self::OutsideRoot { .. }
            | Self::EmptyDirectory { .. }
            | Self::ResetTargetUnreachable { .. }
            | Self::InvalidBatchSize
            | Self::Listing { .. } => ErrorKind::Configuration,
            Self::NoImagesLoaded { .. } => ErrorKind::Exhausted,
            Self::Decode { .. } | Self::Tensor(_) => ErrorKind::Decode,
        }
    }
}
