//! mdh CLI - Markdown to HTML converter.
//!
//! Provides commands for:
//! - `convert`: Convert markdown files (or stdin) to HTML
//! - `check`: Run a fixture file of expected conversions
//! - `demo`: Print sample documents and their HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConvertArgs, DemoArgs};
use output::Output;

/// mdh - Markdown to HTML converter.
#[derive(Parser)]
#[command(name = "mdh", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise RUST_LOG is used).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to HTML.
    Convert(ConvertArgs),
    /// Run conversion fixtures and report mismatches.
    Check(CheckArgs),
    /// Print built-in sample conversions.
    Demo(DemoArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Demo(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
