//! Infrastructure layer for virtual-lab
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and meeting file loading.

pub mod config;
pub mod logging;
pub mod lookup;
pub mod meeting_file;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use lookup::{AdsSearch, AstroLookup, SimbadLookup};
pub use meeting_file::{MeetingFile, MeetingFileError, PersonaRef};
pub use providers::{OpenAiCompatibleGateway, RoutingGateway};
pub use storage::FileTranscriptStore;
