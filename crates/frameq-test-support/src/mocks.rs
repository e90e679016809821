//! Mock implementations of core port traits.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use frameq_core::domain::BatchSummary;
use frameq_core::ports::{BatchOutput, FrameStore, ProgressEvent, ProgressSink};
use image::RgbImage;

use crate::builders::SyntheticFrameBuilder;

#[derive(Clone)]
enum MockEntry {
    Frame(RgbImage),
    /// Fails verification and decoding.
    Corrupt,
    /// Passes verification, fails decoding.
    Undecodable,
}

#[derive(Default, Clone)]
struct MockDir {
    entries: BTreeMap<String, MockEntry>,
    next_ordinal: usize,
}

/// Mock implementation of `FrameStore` for testing.
///
/// Directories are matched on their final path component, so the mock works
/// under any loader input root. Tracks verifications and decodes for
/// assertions.
#[derive(Default)]
pub struct MockFrameStore {
    dirs: BTreeMap<String, MockDir>,
    verify_count: Arc<Mutex<usize>>,
    decoded: Arc<Mutex<Vec<String>>>,
}

impl MockFrameStore {
    /// Creates a store with no directories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one directory of `count` numbered frames.
    #[must_use]
    pub fn with_frames(dir: &str, count: usize) -> Self {
        Self::new().frames(dir, count)
    }

    /// Adds an empty directory.
    #[must_use]
    pub fn empty_dir(mut self, dir: &str) -> Self {
        self.dirs.entry(dir.to_string()).or_default();
        self
    }

    /// Adds `count` numbered frames named `frame_0000.png`, ...
    ///
    /// Numbering continues across calls for the same directory.
    #[must_use]
    pub fn frames(mut self, dir: &str, count: usize) -> Self {
        let mock_dir = self.dirs.entry(dir.to_string()).or_default();
        for _ in 0..count {
            let ordinal = mock_dir.next_ordinal;
            mock_dir.entries.insert(
                format!("frame_{ordinal:04}.png"),
                MockEntry::Frame(SyntheticFrameBuilder::numbered(ordinal)),
            );
            mock_dir.next_ordinal += 1;
        }
        self
    }

    /// Adds a valid frame under a custom name.
    #[must_use]
    pub fn frame(self, dir: &str, name: &str, image: RgbImage) -> Self {
        self.insert(dir, name, MockEntry::Frame(image))
    }

    /// Adds an entry that fails verification.
    #[must_use]
    pub fn corrupt(self, dir: &str, name: &str) -> Self {
        self.insert(dir, name, MockEntry::Corrupt)
    }

    /// Adds an entry that verifies but fails to decode.
    #[must_use]
    pub fn undecodable(self, dir: &str, name: &str) -> Self {
        self.insert(dir, name, MockEntry::Undecodable)
    }

    fn insert(mut self, dir: &str, name: &str, entry: MockEntry) -> Self {
        self.dirs
            .entry(dir.to_string())
            .or_default()
            .entries
            .insert(name.to_string(), entry);
        self
    }

    /// Returns the number of `verify()` calls.
    #[must_use]
    pub fn verify_count(&self) -> usize {
        *self
            .verify_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the names passed to `decode_rgb()`, in call order.
    #[must_use]
    pub fn decoded(&self) -> Vec<String> {
        self.decoded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `decode_rgb()` calls.
    #[must_use]
    pub fn decode_count(&self) -> usize {
        self.decoded().len()
    }

    fn lookup_dir(&self, path: &Path) -> Option<&MockDir> {
        let name = path.file_name()?.to_str()?;
        self.dirs.get(name)
    }

    fn lookup(&self, path: &Path) -> Option<&MockEntry> {
        let name = path.file_name()?.to_str()?;
        self.lookup_dir(path.parent()?)?.entries.get(name)
    }
}

impl FrameStore for MockFrameStore {
    fn is_dir(&self, path: &Path) -> bool {
        self.lookup_dir(path).is_some()
    }

    fn list(&self, dir: &Path) -> anyhow::Result<Vec<String>> {
        let mock_dir = self
            .lookup_dir(dir)
            .ok_or_else(|| anyhow::anyhow!("no such directory: {}", dir.display()))?;
        // Reverse order so callers cannot rely on the store sorting for them.
        Ok(mock_dir.entries.keys().rev().cloned().collect())
    }

    fn verify(&self, path: &Path) -> anyhow::Result<()> {
        *self
            .verify_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        match self.lookup(path) {
            Some(MockEntry::Frame(_) | MockEntry::Undecodable) => Ok(()),
            Some(MockEntry::Corrupt) => anyhow::bail!("corrupt image: {}", path.display()),
            None => anyhow::bail!("no such file: {}", path.display()),
        }
    }

    fn decode_rgb(&self, path: &Path) -> anyhow::Result<RgbImage> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.decoded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name);
        match self.lookup(path) {
            Some(MockEntry::Frame(image)) => Ok(image.clone()),
            Some(MockEntry::Corrupt | MockEntry::Undecodable) => {
                anyhow::bail!("decode failed: {}", path.display())
            }
            None => anyhow::bail!("no such file: {}", path.display()),
        }
    }
}

/// Mock implementation of `BatchOutput` for testing.
///
/// Captures summaries for later assertions.
pub struct MockBatchOutput {
    summaries: Arc<Mutex<Vec<BatchSummary>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockBatchOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            summaries: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured summaries.
    #[must_use]
    pub fn summaries(&self) -> Vec<BatchSummary> {
        self.summaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockBatchOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchOutput for MockBatchOutput {
    fn write(&self, summary: &BatchSummary) -> anyhow::Result<()> {
        self.summaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(summary.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `BatchLoaded` events.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::BatchLoaded { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { batches, frames } => Some((*batches, *frames)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
