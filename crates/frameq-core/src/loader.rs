//! Queued batch loader.
//!
//! Each call returns the next batch of valid frames from a directory for one
//! node instance. The loader is a session object owned by the caller: it holds
//! one cursor per instance, and the caller decides when to release them.
//!
//! A call scans one frame past the batch size. That lookahead frame is never
//! returned; it only decides `has_next`. The cursor stops one past the last
//! returned frame, so the next call starts its scan at the lookahead frame.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use candle_core::{Device, Tensor};
use tracing::{debug, info};

use crate::domain::{
    Cacheability, FrameBatch, FrameRef, InstanceId, LoadOutput, LoadRequest, NodeDescriptor,
};
use crate::error::LoadError;
use crate::frame::{rgb_to_tensor, stack_frames};
use crate::ports::FrameStore;
use crate::scan::{scan_backward, scan_forward, DEFAULT_EXTENSIONS};

/// Where the loader looks for directories and which files it considers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Root that requested directories are resolved under.
    pub input_root: PathBuf,
    /// Allowed file extensions, matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new("input")
    }
}

impl LoaderConfig {
    /// Creates a config rooted at `input_root` with the default extensions.
    #[must_use]
    pub fn new(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_string()).collect(),
        }
    }

    /// Replaces the allowed extensions.
    #[must_use]
    pub fn with_extensions<I, E>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Resolves a requested directory under the input root.
    ///
    /// Surrounding whitespace is trimmed and leading separators are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::OutsideRoot`] if the directory contains a `..`
    /// component.
    pub fn resolve(&self, directory: &str) -> Result<PathBuf, LoadError> {
        let relative = directory.trim().trim_start_matches(['/', '\\']);
        let climbs = Path::new(relative)
            .components()
            .chain(Path::new(&relative.replace('\\', "/")).components())
            .any(|c| matches!(c, Component::ParentDir));
        if climbs {
            return Err(LoadError::OutsideRoot {
                requested: directory.to_string(),
            });
        }

        let joined = self.input_root.join(relative);
        Ok(std::path::absolute(&joined).unwrap_or(joined))
    }
}

/// A frame decoded for the batch under construction.
struct DecodedFrame {
    frame: FrameRef,
    tensor: Tensor,
}

/// Stateful batch loader holding one cursor per node instance.
pub struct QueuedBatchLoader<S> {
    store: S,
    config: LoaderConfig,
    device: Device,
    cursors: HashMap<InstanceId, usize>,
}

impl<S: FrameStore> QueuedBatchLoader<S> {
    /// Creates a loader with no cursors, producing tensors on the CPU.
    #[must_use]
    pub fn new(store: S, config: LoaderConfig) -> Self {
        Self {
            store,
            config,
            device: Device::Cpu,
            cursors: HashMap::new(),
        }
    }

    /// Host registration data for this node.
    #[must_use]
    pub fn descriptor() -> NodeDescriptor {
        NodeDescriptor::queued_batch_images()
    }

    /// The loader keeps state between calls, so hosts must never cache it.
    #[must_use]
    pub const fn cacheability(&self) -> Cacheability {
        Cacheability::Never
    }

    /// Returns the loader configuration.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the underlying frame store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current cursor for `instance`, if it has one.
    #[must_use]
    pub fn cursor(&self, instance: &InstanceId) -> Option<usize> {
        self.cursors.get(instance).copied()
    }

    /// Instances that currently hold a cursor.
    pub fn instances(&self) -> impl Iterator<Item = &InstanceId> {
        self.cursors.keys()
    }

    /// Forgets the cursor of `instance`, returning it.
    pub fn release(&mut self, instance: &InstanceId) -> Option<usize> {
        self.cursors.remove(instance)
    }

    /// Forgets all cursors.
    pub fn clear(&mut self) {
        self.cursors.clear();
    }

    /// Loads the next batch for `request.instance`.
    ///
    /// # Errors
    ///
    /// - [`LoadError::InvalidBatchSize`] if the batch size is zero
    /// - [`LoadError::DirectoryNotFound`] / [`LoadError::EmptyDirectory`] if the
    ///   directory is missing or has no entries
    /// - [`LoadError::ResetTargetUnreachable`] if a reset finds no valid frame
    /// - [`LoadError::NoImagesLoaded`] if nothing is left to return
    /// - [`LoadError::Decode`] / [`LoadError::Tensor`] if a frame cannot be
    ///   decoded or the frames cannot be batched
    pub fn load(&mut self, request: &LoadRequest) -> Result<LoadOutput, LoadError> {
        if request.batch_size == 0 {
            return Err(LoadError::InvalidBatchSize);
        }

        let directory = self.config.resolve(&request.directory)?;
        let files = self.listing(&directory)?;
        debug!("Listed {} entries in {}", files.len(), directory.display());

        if request.reset {
            let cursor = self.reset_position(&files, &directory, request.reset_start_at)?;
            info!(
                "Reset cursor for instance {} to {cursor} (target {})",
                request.instance, request.reset_start_at
            );
            self.cursors.insert(request.instance.clone(), cursor);
        }

        let cursor = self.cursor(&request.instance).unwrap_or(0);
        let extensions = &self.config.extensions;
        let mut batch = Vec::with_capacity(request.batch_size.saturating_add(2));

        let mut pre_framed = false;
        if request.pre_frame && cursor > 0 {
            let previous = scan_backward(&self.store, &files, &directory, 1, cursor, extensions);
            if let Some(&index) = previous.first() {
                batch.push(self.decode(&files, &directory, index)?);
                pre_framed = true;
            }
        }

        let found = scan_forward(
            &self.store,
            &files,
            &directory,
            request.batch_size.saturating_add(1),
            cursor,
            extensions,
        );
        for &index in &found {
            batch.push(self.decode(&files, &directory, index)?);
        }

        let has_next = found.len() > request.batch_size;
        if has_next {
            batch.pop();
        }

        // A lone pre-frame is not returned when no new frames follow it.
        if pre_framed && found.is_empty() {
            batch.remove(0);
        }

        let consumed = &found[..found.len().min(request.batch_size)];
        if let Some(&last) = consumed.last() {
            debug!(
                "Advancing cursor for instance {} from {cursor} to {}",
                request.instance,
                last + 1
            );
            self.cursors.insert(request.instance.clone(), last + 1);
        }

        if batch.is_empty() {
            return Err(LoadError::NoImagesLoaded { path: directory });
        }

        let (frames, tensors): (Vec<FrameRef>, Vec<Tensor>) =
            batch.into_iter().map(|d| (d.frame, d.tensor)).unzip();
        let tensor = stack_frames(&tensors)?;

        Ok(LoadOutput {
            images: FrameBatch::new(tensor, frames),
            pre_framed,
            cursor_before: cursor,
            has_next,
        })
    }

    /// Returns the sorted listing of `directory`.
    fn listing(&self, directory: &Path) -> Result<Vec<String>, LoadError> {
        if !self.store.is_dir(directory) {
            return Err(LoadError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let mut files = self
            .store
            .list(directory)
            .map_err(|e| LoadError::Listing {
                path: directory.to_path_buf(),
                source: e.into(),
            })?;
        if files.is_empty() {
            return Err(LoadError::EmptyDirectory {
                path: directory.to_path_buf(),
            });
        }

        files.sort();
        Ok(files)
    }

    /// Index of the `start_at`-th valid frame, or of the last one if fewer exist.
    fn reset_position(
        &self,
        files: &[String],
        directory: &Path,
        start_at: usize,
    ) -> Result<usize, LoadError> {
        if start_at == 0 {
            return Ok(0);
        }

        scan_forward(
            &self.store,
            files,
            directory,
            start_at.saturating_add(1),
            0,
            &self.config.extensions,
        )
        .last()
        .copied()
        .ok_or_else(|| LoadError::ResetTargetUnreachable {
            path: directory.to_path_buf(),
            target: start_at,
        })
    }

    fn decode(
        &self,
        files: &[String],
        directory: &Path,
        index: usize,
    ) -> Result<DecodedFrame, LoadError> {
        let name = &files[index];
        let path = directory.join(name);
        let rgb = self
            .store
            .decode_rgb(&path)
            .map_err(|e| LoadError::Decode {
                path: path.clone(),
                source: e.into(),
            })?;
        let tensor = rgb_to_tensor(&rgb, &self.device)?;

        Ok(DecodedFrame {
            frame: FrameRef::new(index, name.clone()),
            tensor,
        })
    }
}
