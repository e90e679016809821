//! frameq CLI - queued batch loading of image frames.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{loader_config, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();
    let loader = loader_config(cli.input_root.clone(), &config);

    let result = match cli.command {
        Commands::Scan(ref args) => commands::scan::run(args, &loader, &config),
        Commands::Load(ref args) => commands::load::run(args, loader, &config),
        Commands::Drain(ref args) => commands::drain::run(args, loader, &config),
        Commands::Describe(ref args) => commands::describe::run(args, &config),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::for_error(&e)
        }
    };

    exit_code.into()
}
