//! Describe command - print the node descriptor.

use anyhow::Result;
use clap::Args;
use frameq_core::NodeDescriptor;

use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the describe command.
#[derive(Args, Clone)]
pub struct DescribeArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the describe command.
pub fn run(args: &DescribeArgs, config: &AppConfig) -> Result<()> {
    let pretty = args.pretty || config.output.pretty.unwrap_or(false);
    JsonOutput::stdout().write_value(&NodeDescriptor::queued_batch_images(), pretty)
}
