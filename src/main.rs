//! Kingdom CLI - Command-line interface for playing and simulating Pocket Kingdom.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use pocket_kingdom::simulation::Strategy;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Pocket Kingdom - A deterministic turn-based kingdom engine
#[derive(Parser, Debug)]
#[command(name = "kingdom")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively, one command per line
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rules file (JSON, missing fields use defaults)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Apply a scripted list of commands and print the final kingdom
    Run {
        /// Commands such as "build farm", "recruit", "wonder" or "end"
        #[arg(required = true)]
        commands: Vec<String>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rules file (JSON, missing fields use defaults)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play many automated games in parallel and aggregate statistics
    Simulate {
        /// Policy that plays every game
        #[arg(long, default_value = "garrison")]
        strategy: Strategy,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per game (default: 300)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Rules file (JSON, missing fields use defaults)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulationFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the effective rules as JSON
    Rules {
        /// Rules file to validate and print (default: built-in rules)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Play { seed, rules } => cli::play::execute(seed, rules.as_deref()),

        Commands::Run {
            commands,
            seed,
            rules,
            format,
        } => cli::run::execute(&commands, seed, rules.as_deref(), format),

        Commands::Simulate {
            strategy,
            games,
            seed,
            threads,
            max_turns,
            rules,
            format,
            progress,
        } => cli::simulate::execute(
            strategy,
            games,
            seed,
            threads,
            max_turns,
            rules.as_deref(),
            format,
            progress,
        ),

        Commands::Rules { rules } => cli::rules::execute(rules.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
