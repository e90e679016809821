//! Load command - run the loader once.

use anyhow::Result;
use clap::Args;
use frameq_adapters::FsFrameStore;
use frameq_core::{LoaderConfig, QueuedBatchLoader};
use tracing::info;

use super::BatchArgs;
use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the load command.
#[derive(Args, Clone)]
pub struct LoadArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the load command and print the batch summary.
pub fn run(args: &LoadArgs, loader_config: LoaderConfig, config: &AppConfig) -> Result<()> {
    let batch = BatchArgs::with_config(args.batch.clone(), config);
    let mut loader = QueuedBatchLoader::new(FsFrameStore::new(), loader_config);

    let output = loader.load(&batch.request(true))?;
    info!(
        "Loaded {} frame(s), pre-framed {}, has next {}",
        output.images.len(),
        output.pre_framed,
        output.has_next
    );

    let pretty = args.pretty || config.output.pretty.unwrap_or(false);
    JsonOutput::stdout().write_value(&output.summary(), pretty)
}
