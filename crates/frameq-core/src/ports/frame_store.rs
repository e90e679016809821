//! Frame store port for listing, verifying and decoding frames.

use std::path::Path;

use image::RgbImage;

/// Port for reading frames from a directory-like store.
pub trait FrameStore: Send + Sync {
    /// Returns true if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names of a directory, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list(&self, dir: &Path) -> anyhow::Result<Vec<String>>;

    /// Opens `path` and checks that it holds a decodable image.
    ///
    /// The file is closed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or not a valid image.
    fn verify(&self, path: &Path) -> anyhow::Result<()>;

    /// Decodes `path` and converts it to 8-bit RGB.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails.
    fn decode_rgb(&self, path: &Path) -> anyhow::Result<RgbImage>;
}
