//! Transcript persistence port

use lab_domain::Transcript;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid save name: {0}")]
    InvalidName(String),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Where a transcript is written: a directory plus a base file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    dir: PathBuf,
    name: String,
}

impl SaveTarget {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reject names that are empty or would escape the directory
    pub fn validate(&self) -> Result<(), StoreError> {
        let name = self.name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(StoreError::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

/// Files written for one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTranscript {
    /// Structured record (ordered `{speaker, text}` list)
    pub structured: PathBuf,
    /// Human-readable rendering
    pub rendered: PathBuf,
}

/// Port for persisting a finished transcript.
///
/// The use case calls this once, after the last turn.
pub trait TranscriptStore: Send + Sync {
    fn save(&self, target: &SaveTarget, transcript: &Transcript)
    -> Result<SavedTranscript, StoreError>;
}
