//! Scan command - list the valid frames of a directory.

use anyhow::Result;
use clap::Args;
use frameq_adapters::FsFrameStore;
use frameq_core::{find_valid_frames, FrameRef, FrameStore, LoadError, LoaderConfig};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the scan command.
#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Directory to scan, relative to the input root
    pub directory: String,

    /// Frames to collect; negative scans backward [default: all]
    #[arg(long, allow_negative_numbers = true)]
    pub max_frames: Option<isize>,

    /// Index to start from; backward scans stop just before it
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start_from: isize,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// What `scan` prints.
#[derive(Debug, Serialize)]
struct ScanReport {
    directory: String,
    frames: Vec<FrameRef>,
}

/// Run the scan command.
pub fn run(args: &ScanArgs, loader_config: &LoaderConfig, config: &AppConfig) -> Result<()> {
    let store = FsFrameStore::new();
    let directory = loader_config.resolve(&args.directory)?;
    info!("Scanning {}", directory.display());

    if !store.is_dir(&directory) {
        return Err(LoadError::DirectoryNotFound { path: directory }.into());
    }

    let mut files = store.list(&directory)?;
    files.sort();

    let max_frames = args
        .max_frames
        .unwrap_or_else(|| isize::try_from(files.len()).unwrap_or(isize::MAX));
    let found = find_valid_frames(
        &store,
        &files,
        &directory,
        max_frames,
        args.start_from,
        &loader_config.extensions,
    );

    let report = ScanReport {
        directory: directory.display().to_string(),
        frames: found
            .into_iter()
            .map(|index| FrameRef::new(index, files[index].clone()))
            .collect(),
    };

    let pretty = args.pretty || config.output.pretty.unwrap_or(false);
    JsonOutput::stdout().write_value(&report, pretty)
}
