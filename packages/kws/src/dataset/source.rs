//! Sample indexing.
//!
//! [`SampleSource`] is the seam between the training core and the file
//! system: [`CommandDirSource`] walks `<root>/<keyword>/*.wav`, tests provide
//! their own in-memory sources.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::Vocabulary;
use crate::{
    constants::WAV_EXTENSION,
    error::{KwsError, Result},
};

/// One labelled clip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub path: PathBuf,
    pub label: u32,
}

impl Sample {
    pub fn new(path: impl Into<PathBuf>, label: u32) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }
}

pub trait SampleSource {
    /// Every `(path, label)` pair found under `root`.
    fn list_samples(&self, root: &Path) -> Result<Vec<Sample>>;
}

/// One subdirectory per keyword of the vocabulary.
///
/// A keyword without a directory only produces a warning and contributes no
/// samples. Files are taken in sorted order.
pub struct CommandDirSource<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> CommandDirSource<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl SampleSource for CommandDirSource<'_> {
    fn list_samples(&self, root: &Path) -> Result<Vec<Sample>> {
        if !root.is_dir() {
            return Err(KwsError::NotFound(root.to_path_buf()));
        }

        let mut samples = Vec::new();
        for (label, command) in self.vocabulary.iter() {
            let dir = root.join(command);
            if !dir.is_dir() {
                warn!("command directory {} does not exist", dir.display());
                continue;
            }

            let mut files = Vec::new();
            for entry in std::fs::read_dir(&dir).map_err(|e| KwsError::io(&dir, e))? {
                let path = entry.map_err(|e| KwsError::io(&dir, e))?.path();
                let is_wav = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(WAV_EXTENSION));
                if is_wav && path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            debug!("{command}: {} clips", files.len());

            samples.extend(files.into_iter().map(|path| Sample::new(path, label)));
        }
        Ok(samples)
    }
}

/// Check every label against the vocabulary size.
pub fn validate_labels(samples: &[Sample], classes: usize) -> Result<()> {
    match samples.iter().find(|s| s.label as usize >= classes) {
        Some(bad) => Err(KwsError::LabelOutOfRange {
            label: bad.label,
            classes,
        }),
        None => Ok(()),
    }
}
