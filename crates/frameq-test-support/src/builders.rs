//! Synthetic frame builders for testing.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Red channel value that identifies frame `ordinal`.
///
/// Frames built by this crate are solid colors whose red channel encodes their
/// ordinal, so a test can tell which file a tensor slice came from.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn frame_value(ordinal: usize) -> u8 {
    ((ordinal * 10) % 256) as u8
}

/// Builder for creating synthetic frames.
pub struct SyntheticFrameBuilder;

impl SyntheticFrameBuilder {
    /// Default frame width.
    pub const WIDTH: u32 = 8;
    /// Default frame height.
    pub const HEIGHT: u32 = 6;

    /// Creates a solid frame with the given color.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    /// Creates the default-size frame identified by `ordinal`.
    #[must_use]
    pub fn numbered(ordinal: usize) -> RgbImage {
        Self::solid(Self::WIDTH, Self::HEIGHT, [frame_value(ordinal), 64, 128])
    }
}

enum Entry {
    Frame { name: String, image: RgbImage },
    Raw { name: String, bytes: Vec<u8> },
    Dir { name: String },
}

/// Builds a temporary directory of frame files.
///
/// Valid frames are PNG files named `frame_0000.png`, `frame_0001.png`, ...
/// Extra entries (hidden files, corrupt images, non-images, subdirectories)
/// can be mixed in; the directory listing order is decided by name.
#[derive(Default)]
pub struct FrameDirBuilder {
    entries: Vec<Entry>,
    frames: usize,
}

impl FrameDirBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` more numbered frames.
    #[must_use]
    pub fn frames(mut self, count: usize) -> Self {
        for _ in 0..count {
            let ordinal = self.frames;
            self.entries.push(Entry::Frame {
                name: format!("frame_{ordinal:04}.png"),
                image: SyntheticFrameBuilder::numbered(ordinal),
            });
            self.frames += 1;
        }
        self
    }

    /// Adds a valid frame under a custom name; the format follows the extension.
    #[must_use]
    pub fn frame_named(mut self, name: &str, image: RgbImage) -> Self {
        self.entries.push(Entry::Frame {
            name: name.to_string(),
            image,
        });
        self
    }

    /// Adds a file with an image extension but garbage content.
    #[must_use]
    pub fn corrupt(self, name: &str) -> Self {
        self.raw(name, b"definitely not an image")
    }

    /// Adds a file with arbitrary content.
    #[must_use]
    pub fn raw(mut self, name: &str, bytes: &[u8]) -> Self {
        self.entries.push(Entry::Raw {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        });
        self
    }

    /// Adds an empty subdirectory.
    #[must_use]
    pub fn subdir(mut self, name: &str) -> Self {
        self.entries.push(Entry::Dir {
            name: name.to_string(),
        });
        self
    }

    /// Writes all entries into a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory or any file cannot be written.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn build(self) -> TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        self.write_into(dir.path());
        dir
    }

    /// Writes all entries into an existing directory.
    ///
    /// # Panics
    ///
    /// Panics if any entry cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_into(self, dir: &Path) {
        for entry in self.entries {
            match entry {
                Entry::Frame { name, image } => {
                    image.save(dir.join(&name)).expect("write frame");
                }
                Entry::Raw { name, bytes } => {
                    fs::write(dir.join(&name), bytes).expect("write file");
                }
                Entry::Dir { name } => {
                    fs::create_dir_all(dir.join(&name)).expect("create subdir");
                }
            }
        }
    }
}
