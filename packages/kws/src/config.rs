//! Run configuration for the two trainers.
//!
//! Each record is built once at start-up: defaults, then an optional TOML
//! file, then command-line overrides applied by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    constants::BINARY_HIDDEN,
    error::{KwsError, Result},
};

fn load_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| KwsError::io(path, e))?;
    toml::from_str(&content).map_err(|source| KwsError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Binarized perceptron on log-Mel features.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinaryTrainConfig {
    /// Root holding one subdirectory per keyword
    pub dataset_dir: PathBuf,
    /// Keyword manifest, one per line
    pub commands_file: PathBuf,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub hidden_size: usize,
    /// Share of samples used for training, the rest is held out
    pub train_ratio: f32,
    /// Step loss and gradient diagnostics cadence
    pub log_every: usize,
    /// Use sign(b) instead of b in both binary layers
    pub binarize_bias: bool,
    /// Fixed seed for the split and the per-epoch shuffling; random when absent
    pub seed: Option<u64>,
}

impl Default for BinaryTrainConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("./speech-commands"),
            commands_file: PathBuf::from("./commands_list.txt"),
            epochs: 20,
            batch_size: 100,
            learning_rate: 1e-4,
            hidden_size: BINARY_HIDDEN,
            train_ratio: 0.8,
            log_every: 10,
            binarize_bias: true,
            seed: None,
        }
    }
}

impl BinaryTrainConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }
}

/// Floating-point MLP on MFCC features, exported after training.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceTrainConfig {
    /// Root holding one subdirectory per keyword; the sorted names are the labels
    pub dataset_dir: PathBuf,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub hidden_sizes: Vec<usize>,
    /// Directory receiving the checkpoint and the text weight files
    pub output_dir: PathBuf,
    pub checkpoint_name: String,
    /// Also write `<name>_binarized.txt` with the sign of every value
    pub binarized_export: bool,
    pub seed: Option<u64>,
}

impl Default for ReferenceTrainConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("speech_commands"),
            epochs: 10,
            batch_size: 32,
            learning_rate: 1e-3,
            hidden_sizes: vec![128, 64],
            output_dir: PathBuf::from("."),
            checkpoint_name: "mlp_speech_commands.safetensors".to_owned(),
            binarized_export: false,
            seed: None,
        }
    }
}

impl ReferenceTrainConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.output_dir.join(&self.checkpoint_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.toml");
        std::fs::write(&path, "epochs = 3\nbinarize_bias = false\nseed = 42\n").unwrap();

        let cfg = BinaryTrainConfig::from_toml_file(&path).unwrap();
        assert_eq!(cfg.epochs, 3);
        assert!(!cfg.binarize_bias);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.batch_size, 100);
        assert_eq!(cfg.hidden_size, 500);
    }

    #[test]
    fn reference_defaults() {
        let cfg = ReferenceTrainConfig::default();
        assert_eq!(cfg.hidden_sizes, [128, 64]);
        assert_eq!(
            cfg.checkpoint_path(),
            Path::new("./mlp_speech_commands.safetensors")
        );
    }

    #[test]
    fn bad_files_map_to_distinct_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "epochs = \"many\"").unwrap();
        assert!(matches!(
            ReferenceTrainConfig::from_toml_file(&path),
            Err(KwsError::Config { .. })
        ));
        assert!(matches!(
            ReferenceTrainConfig::from_toml_file(&dir.path().join("missing.toml")),
            Err(KwsError::NotFound(_))
        ));
    }
}
