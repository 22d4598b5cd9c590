//! Mergetrace CLI - Command-line interface for the BPE training simulator.
//!
//! This is the main entry point for the `mergetrace` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{EncodeCommand, ModelsCommand, TrainCommand};
use env_logger::Env;

#[derive(Parser)]
#[command(name = "mergetrace")]
#[command(about = "Step through BPE vocabulary growth merge by merge", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on text and print the merge trajectory
    Train(TrainCommand),
    /// Train on a corpus, then tokenize text with the learned merges
    Encode(EncodeCommand),
    /// List the built-in model variants
    Models(ModelsCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Models(cmd) => commands::models::run(cmd)?,
    }

    Ok(())
}
