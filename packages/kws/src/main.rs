//! kws CLI binary

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

mod cli;
use cli::{Cli, Commands, TrainBinaryCommand, TrainReferenceCommand};

use kws::{
    BinaryTrainConfig, ReferenceTrainConfig,
    audio::WavLoader,
    dataset::{CommandDirSource, Vocabulary},
    train_binary, train_reference,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::TrainBinary(cmd) => {
            info!("Training binarized model...");
            run_binary(cmd)
        }
        Commands::TrainReference(cmd) => {
            info!("Training reference model...");
            run_reference(cmd)
        }
    }
}

fn run_binary(cmd: TrainBinaryCommand) -> Result<()> {
    let mut config = match &cmd.config {
        Some(path) => BinaryTrainConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BinaryTrainConfig::default(),
    };
    if let Some(v) = cmd.dataset_dir {
        config.dataset_dir = v;
    }
    if let Some(v) = cmd.commands_file {
        config.commands_file = v;
    }
    if let Some(v) = cmd.epochs {
        config.epochs = v;
    }
    if let Some(v) = cmd.batch_size {
        config.batch_size = v;
    }
    if let Some(v) = cmd.learning_rate {
        config.learning_rate = v;
    }
    if let Some(v) = cmd.hidden_size {
        config.hidden_size = v;
    }
    if cmd.seed.is_some() {
        config.seed = cmd.seed;
    }
    info!("Training with config: {config:?}");

    let vocabulary = Vocabulary::from_manifest(&config.commands_file)
        .with_context(|| format!("reading commands from {}", config.commands_file.display()))?;
    let source = CommandDirSource::new(&vocabulary);
    let outcome = train_binary(&config, &vocabulary, &source, &WavLoader)
        .context("binarized training failed")?;

    println!("Test accuracy: {}", outcome.accuracy);
    Ok(())
}

fn run_reference(cmd: TrainReferenceCommand) -> Result<()> {
    let mut config = match &cmd.config {
        Some(path) => ReferenceTrainConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReferenceTrainConfig::default(),
    };
    if let Some(v) = cmd.dataset_dir {
        config.dataset_dir = v;
    }
    if let Some(v) = cmd.epochs {
        config.epochs = v;
    }
    if let Some(v) = cmd.batch_size {
        config.batch_size = v;
    }
    if let Some(v) = cmd.learning_rate {
        config.learning_rate = v;
    }
    if let Some(v) = cmd.output_dir {
        config.output_dir = v;
    }
    if cmd.binarized_export {
        config.binarized_export = true;
    }
    if cmd.seed.is_some() {
        config.seed = cmd.seed;
    }
    info!("Training with config: {config:?}");

    let vocabulary = Vocabulary::from_subdirectories(&config.dataset_dir)
        .with_context(|| format!("listing keywords in {}", config.dataset_dir.display()))?;
    let source = CommandDirSource::new(&vocabulary);
    let outcome = train_reference(&config, &vocabulary, &source, &WavLoader)
        .context("reference training failed")?;

    info!(
        "{} weight files written next to {}",
        outcome.exported.len(),
        outcome.checkpoint.display()
    );
    Ok(())
}
