//! Drain command - tick the loader until the directory is exhausted.

use std::io::IsTerminal;

use anyhow::Result;
use clap::Args;
use frameq_adapters::FsFrameStore;
use frameq_core::scan::is_candidate;
use frameq_core::{
    BatchOutput, FrameStore, LoaderConfig, ProgressEvent, ProgressSink,
    QueuedBatchLoader,
};
use tracing::{debug, info};

use super::{BatchArgs, OutputFormat};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Arguments for the drain command.
#[derive(Args, Clone)]
pub struct DrainArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress spinner
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl DrainArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.batch = BatchArgs::with_config(args.batch, config);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config);
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }
}

/// Totals of a finished drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainResult {
    /// Batches loaded.
    pub batches: usize,
    /// New frames loaded, pre-frames excluded.
    pub frames: usize,
}

/// Run the drain command.
pub fn run(args: &DrainArgs, loader_config: LoaderConfig, config: &AppConfig) -> Result<()> {
    let args = DrainArgs::with_config(args.clone(), config);

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(args.quiet, show_progress);

    let output = match args.format.unwrap_or_default() {
        OutputFormat::Jsonl => JsonOutput::stdout(),
        OutputFormat::Json => JsonOutput::stdout().into_array(args.pretty),
    };

    let mut loader = QueuedBatchLoader::new(FsFrameStore::new(), loader_config);
    let result = drain(&mut loader, &args.batch, &progress, &output);
    output.flush()?;

    let drained = result?;
    info!(
        "Drained {} in {} batch(es), {} frame(s)",
        args.batch.directory, drained.batches, drained.frames
    );
    Ok(())
}

/// Loads batches on one loader session until `has_next` is false.
///
/// A reset in `args` applies to the first batch only. Summaries written
/// before a failure stay in `output`; the caller flushes it.
pub fn drain<S: FrameStore>(
    loader: &mut QueuedBatchLoader<S>,
    args: &BatchArgs,
    progress: &dyn ProgressSink,
    output: &dyn BatchOutput,
) -> Result<DrainResult> {
    progress.on_event(ProgressEvent::Started {
        directory: args.directory.clone(),
        total: candidate_count(loader, &args.directory),
    });

    let mut batches = 0;
    let mut frames = 0;
    loop {
        let loaded = loader.load(&args.request(batches == 0))?;
        let summary = loaded.summary();
        debug!(
            "Batch {batches}: {} frame(s) from cursor {}",
            summary.frames.len(),
            summary.cursor_before
        );

        frames += summary.frames.len() - usize::from(summary.pre_framed);
        output.write(&summary)?;
        progress.on_event(ProgressEvent::BatchLoaded {
            batch: batches,
            summary,
        });
        batches += 1;

        if !loaded.has_next {
            break;
        }
    }

    progress.on_event(ProgressEvent::Finished { batches, frames });

    Ok(DrainResult { batches, frames })
}

/// Files that pass the name filter, as an upper bound on the frame count.
fn candidate_count<S: FrameStore>(loader: &QueuedBatchLoader<S>, directory: &str) -> Option<usize> {
    let config = loader.config();
    let names = loader.store().list(&config.resolve(directory).ok()?).ok()?;
    Some(
        names
            .iter()
            .filter(|name| is_candidate(name, &config.extensions))
            .count(),
    )
}
