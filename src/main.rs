//! Gobble CLI - play the arena in a terminal or run it headless.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Gobble - a two-player snake arena
#[derive(Parser, Debug)]
#[command(name = "gobble")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed (default: random)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// JSON rules file; fields it omits keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive two-player game in the terminal
    Play,

    /// Run a game headless for a fixed number of ticks
    Run {
        /// Ticks to simulate (stops early on game over)
        #[arg(short, long, default_value = "500")]
        ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// JSON file of intents to deliver at given ticks
        #[arg(short, long)]
        intents: Option<PathBuf>,

        /// Colorize the text board
        #[arg(long)]
        color: bool,
    },

    /// Print the effective rules as JSON
    Config,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = cli::load_config(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Play => cli::play::execute(config, args.seed),

        Commands::Run {
            ticks,
            format,
            intents,
            color,
        } => cli::run::execute(config, args.seed, ticks, format, intents, color),

        Commands::Config => cli::show_config(&config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
