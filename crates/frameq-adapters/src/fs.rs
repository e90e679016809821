//! Filesystem adapter for listing, verifying and decoding frames.

use std::path::Path;

use anyhow::{Context, Result};
use frameq_core::FrameStore;
use image::{ImageReader, RgbImage};
use tracing::{trace, warn};

/// Filesystem frame store adapter.
///
/// Formats are detected from file content, not from the extension.
/// Verification reads the header only; pixel data is decoded once, by
/// `decode_rgb`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFrameStore;

impl FsFrameStore {
    /// Creates a new filesystem frame store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FrameStore for FsFrameStore {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping non-UTF-8 file name {name:?} in {}", dir.display()),
            }
        }

        Ok(names)
    }

    fn verify(&self, path: &Path) -> Result<()> {
        trace!("Verifying {}", path.display());
        let reader = open(path)?;
        if reader.format().is_none() {
            anyhow::bail!("Unrecognized image format: {}", path.display());
        }
        let (width, height) = reader
            .into_dimensions()
            .with_context(|| format!("Failed to read image header: {}", path.display()))?;
        if width == 0 || height == 0 {
            anyhow::bail!("Empty image: {}", path.display());
        }
        Ok(())
    }

    fn decode_rgb(&self, path: &Path) -> Result<RgbImage> {
        let image = open(path)?
            .decode()
            .with_context(|| format!("Failed to decode image: {}", path.display()))?;
        Ok(image.to_rgb8())
    }
}

/// Opens `path` with its format guessed from the leading bytes.
fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image header: {}", path.display()))
}
