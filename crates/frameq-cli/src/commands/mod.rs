//! CLI command definitions and handlers.

pub mod describe;
pub mod drain;
pub mod load;
pub mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use frameq_core::domain::defaults;
use frameq_core::{ErrorKind, InstanceId, LoadError, LoadRequest, LoaderConfig};

use crate::config::AppConfig;

/// frameq - Queued batch loading of image frames
#[derive(Parser)]
#[command(name = "frameq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root that directories are resolved under [default: input]
    #[arg(long, value_name = "DIR", global = true)]
    pub input_root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List the valid frames of a directory
    Scan(scan::ScanArgs),
    /// Load one batch
    Load(load::LoadArgs),
    /// Load batches until the directory is exhausted
    Drain(drain::DrainArgs),
    /// Print the node descriptor
    Describe(describe::DescribeArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed.
    Success = 0,
    /// No images could be loaded.
    Exhausted = 1,
    /// Any other failure.
    Error = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<LoadError>() {
            Some(e) if e.kind() == ErrorKind::Exhausted => Self::Exhausted,
            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Output format for batch summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

impl OutputFormat {
    /// Parses a config file value.
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Builds the loader configuration: CLI root, then config, then defaults.
pub fn loader_config(input_root: Option<PathBuf>, config: &AppConfig) -> LoaderConfig {
    let root = input_root
        .or_else(|| config.input.root.clone())
        .unwrap_or_else(|| LoaderConfig::default().input_root);
    let loader_config = LoaderConfig::new(root);

    match &config.input.extensions {
        Some(extensions) => loader_config.with_extensions(extensions.iter().cloned()),
        None => loader_config,
    }
}

/// Node inputs shared by `load` and `drain`.
#[derive(Args, Clone)]
pub struct BatchArgs {
    /// Directory to load from, relative to the input root
    pub directory: String,

    /// Frames per batch [default: 8]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: Option<u64>,

    /// Do not lead batches with the frame before the cursor
    #[arg(long)]
    pub no_pre_frame: bool,

    /// Move the cursor before loading
    #[arg(long)]
    pub reset: bool,

    /// Valid-frame ordinal to reset to
    #[arg(long, default_value_t = 0, requires = "reset")]
    pub reset_start_at: u64,

    /// Node instance the cursor belongs to
    #[arg(long, default_value = "0")]
    pub instance: String,
}

impl BatchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.batch_size = args
            .batch_size
            .or_else(|| config.batch.size.map(|s| s as u64));

        // CLI --no-pre-frame always wins
        if !args.no_pre_frame {
            args.no_pre_frame = !config.batch.pre_frame.unwrap_or(defaults::PRE_FRAME);
        }

        args
    }

    /// Builds the loader request for these arguments.
    ///
    /// `reset` is applied only when `first` is set, so a drain resets once.
    #[allow(clippy::cast_possible_truncation)]
    pub fn request(&self, first: bool) -> LoadRequest {
        let batch_size = self
            .batch_size
            .map_or(defaults::BATCH_SIZE, |s| s as usize);
        let request = LoadRequest::new(self.directory.as_str(), InstanceId::new(&self.instance))
            .with_batch_size(batch_size)
            .with_pre_frame(!self.no_pre_frame);

        if self.reset && first {
            request.with_reset(self.reset_start_at as usize)
        } else {
            request
        }
    }
}
