use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Invspec stochastic matrix generator.
#[derive(Parser)]
#[command(
    name = "invspec",
    version,
    about = "Row-stochastic matrices with a prescribed spectrum"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Construct stochastic matrices for a spectrum.
    Generate(GenerateArgs),
    /// Re-verify the matrices in a generated JSON document.
    Check(CheckArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args, Default)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the requested eigenvalues (comma separated, each in [0, 1)).
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub eigenvalues: Option<Vec<f64>>,

    /// Override the RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of independent matrices to draw.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Override the element selection policy (uniform, largest, first).
    #[arg(long)]
    pub selection: Option<String>,

    /// Override the output JSON path (stdout when unset).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to a JSON document written by `generate`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the RMSD tolerance recorded in the document.
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Path for the JSON report (stdout when unset).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
