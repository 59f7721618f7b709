//! Command vocabulary: ordered, de-duplicated keyword labels.
//!
//! The position of a keyword is its class index, so the vocabulary is a
//! bijection between keywords and `0..len()`.

use std::path::Path;

use indexmap::IndexSet;

use crate::error::{KwsError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    commands: IndexSet<String>,
}

impl Vocabulary {
    /// Keep the first occurrence of every non-empty, trimmed keyword.
    pub fn from_commands<I, S>(commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands: IndexSet<String> = commands
            .into_iter()
            .map(|c| c.as_ref().trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();
        if commands.is_empty() {
            return Err(KwsError::EmptyVocabulary);
        }
        Ok(Self { commands })
    }

    /// One keyword per line.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| KwsError::io(path, e))?;
        Self::from_commands(text.lines())
    }

    /// Sorted names of the subdirectories of `root`.
    pub fn from_subdirectories(root: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).map_err(|e| KwsError::io(root, e))? {
            let entry = entry.map_err(|e| KwsError::io(root, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Self::from_commands(names)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn index_of(&self, command: &str) -> Option<u32> {
        self.commands.get_index_of(command).map(|i| i as u32)
    }

    pub fn command(&self, index: u32) -> Option<&str> {
        self.commands.get_index(index as usize).map(String::as_str)
    }

    /// `(index, keyword)` pairs in class order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.commands
            .iter()
            .enumerate()
            .map(|(i, c)| (i as u32, c.as_str()))
    }
}
