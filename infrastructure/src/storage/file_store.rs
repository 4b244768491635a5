//! Writes a transcript as `{name}.json` and `{name}.md` in a directory.

use lab_application::ports::transcript_store::{
    SaveTarget, SavedTranscript, StoreError, TranscriptStore,
};
use lab_domain::Transcript;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Filesystem transcript store
///
/// The JSON file holds the ordered `{speaker, text}` list; the Markdown file
/// holds one `## speaker` section per turn. The target directory is created
/// on first save.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTranscriptStore;

impl FileTranscriptStore {
    pub fn new() -> Self {
        Self
    }
}

fn write(path: &Path, content: &str) -> Result<(), StoreError> {
    fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl TranscriptStore for FileTranscriptStore {
    fn save(
        &self,
        target: &SaveTarget,
        transcript: &Transcript,
    ) -> Result<SavedTranscript, StoreError> {
        target.validate()?;

        let dir = target.dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let structured = dir.join(format!("{}.json", target.name()));
        let json = serde_json::to_string_pretty(transcript)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write(&structured, &json)?;

        let rendered = dir.join(format!("{}.md", target.name()));
        write(&rendered, &transcript.to_markdown())?;

        debug!(
            json = %structured.display(),
            markdown = %rendered.display(),
            turns = transcript.len(),
            "Wrote transcript"
        );

        Ok(SavedTranscript {
            structured,
            rendered,
        })
    }
}
