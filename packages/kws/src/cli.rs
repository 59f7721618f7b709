//! Command line interface for the keyword trainers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Speech-command keyword trainers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the binarized perceptron and report test accuracy
    TrainBinary(TrainBinaryCommand),

    /// Train the reference MLP and export its weights
    TrainReference(TrainReferenceCommand),
}

/// Flags override the config file, which overrides the defaults.
#[derive(Parser, Debug)]
pub struct TrainBinaryCommand {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory with one subdirectory per keyword
    #[arg(short, long)]
    pub dataset_dir: Option<PathBuf>,

    /// Keyword manifest, one keyword per line
    #[arg(long)]
    pub commands_file: Option<PathBuf>,

    #[arg(short, long)]
    pub epochs: Option<usize>,

    #[arg(short, long)]
    pub batch_size: Option<usize>,

    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Width of the hidden binary layer
    #[arg(long)]
    pub hidden_size: Option<usize>,

    /// Seed for the train/test split and shuffling
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct TrainReferenceCommand {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory with one subdirectory per keyword
    #[arg(short, long)]
    pub dataset_dir: Option<PathBuf>,

    #[arg(short, long)]
    pub epochs: Option<usize>,

    #[arg(short, long)]
    pub batch_size: Option<usize>,

    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Where the checkpoint and text weight files go
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write sign-binarized copies of the weight files
    #[arg(long)]
    pub binarized_export: bool,

    #[arg(long)]
    pub seed: Option<u64>,
}
