//! In-crate stub store for unit tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgb, RgbImage};

use crate::ports::FrameStore;

/// Flat in-memory directory named `dir`; each entry is valid or corrupt.
pub struct StubStore {
    entries: BTreeMap<String, bool>,
    verified: AtomicUsize,
}

impl StubStore {
    pub fn from_entries(entries: &[(&str, bool)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, ok)| ((*name).to_string(), *ok))
                .collect(),
            verified: AtomicUsize::new(0),
        }
    }

    /// `n` valid frames named `f000.png`, `f001.png`, ...
    pub fn frames(n: usize) -> Self {
        let names: Vec<String> = (0..n).map(|i| format!("f{i:03}.png")).collect();
        let entries: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), true)).collect();
        Self::from_entries(&entries)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn verify_count(&self) -> usize {
        self.verified.load(Ordering::SeqCst)
    }

    fn entry(&self, path: &Path) -> Option<bool> {
        let name = path.file_name()?.to_str()?;
        self.entries.get(name).copied()
    }
}

impl FrameStore for StubStore {
    fn is_dir(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|n| n == "dir")
    }

    fn list(&self, _dir: &Path) -> anyhow::Result<Vec<String>> {
        Ok(self.entries.keys().rev().cloned().collect())
    }

    fn verify(&self, path: &Path) -> anyhow::Result<()> {
        self.verified.fetch_add(1, Ordering::SeqCst);
        match self.entry(path) {
            Some(true) => Ok(()),
            _ => anyhow::bail!("not an image: {}", path.display()),
        }
    }

    fn decode_rgb(&self, path: &Path) -> anyhow::Result<RgbImage> {
        self.verify(path)?;
        Ok(RgbImage::from_pixel(2, 2, Rgb([10, 20, 30])))
    }
}
