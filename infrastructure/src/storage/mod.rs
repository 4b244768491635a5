//! Transcript persistence on the local filesystem.
//!
//! Provides [`FileTranscriptStore`], which implements the
//! [`TranscriptStore`](lab_application::TranscriptStore) port.

mod file_store;

pub use file_store::FileTranscriptStore;
