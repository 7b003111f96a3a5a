//! alog CLI - drive the alog logging engine from the command line.
//!
//! Builds a registry from the config file plus command-line overrides, then
//! emits entries through it.
//!
//! # Usage
//!
//! ```bash
//! # Emit one entry
//! alog --level info emit APP info "service started" -m port=8080
//!
//! # Hammer a file sink from many threads
//! alog --file /tmp/load.log --no-stdout stress --threads 8 --lines 10000
//!
//! # Show what a filter spec lets through
//! alog --level error --filters APP:debug levels APP DB
//!
//! # View configuration
//! alog config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// alog - channel and level filtered logging.
#[derive(Parser, Debug)]
#[command(name = "alog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output diagnostics in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    engine: cli::setup::EngineArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Emit a single entry
    Emit(cli::emit::EmitArgs),

    /// Log concurrently from many threads and verify every line arrived whole
    Stress(cli::stress::StressArgs),

    /// Show the effective level and enabled levels per channel
    Levels(cli::levels::LevelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    tracing::debug!("alog v{}", alog_core::VERSION);

    match cli.command {
        Commands::Emit(args) => cli::emit::execute(args, &cli.engine),
        Commands::Stress(args) => cli::stress::execute(args, &cli.engine),
        Commands::Levels(args) => cli::levels::execute(args, &cli.engine),
        Commands::Config(args) => cli::config::execute(args, &cli.engine),
    }
}
