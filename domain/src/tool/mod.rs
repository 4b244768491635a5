//! Tool domain module
//!
//! Tools let a completion backend consult external knowledge in the middle
//! of a reply. The lab offers two read-only lookups (see [`lookup`]); the
//! orchestrator never sees the calls, only the final text.
//!
//! ```text
//! ToolDefinition ──▶ ToolCall ──▶ LookupRequest ──▶ ReferenceLookup port
//!  (schema)          (model)      (validated)        (application layer)
//! ```

pub mod entities;
pub mod lookup;

pub use entities::{ParamKind, ToolCall, ToolDefinition, ToolParameter};
pub use lookup::{ADS_SEARCH, LookupRequest, SIMBAD_SEARCH, lookup_tools};
