//! Directive domain
//!
//! A directive is an instructional turn written by the orchestrator (never by
//! the model) that tells the next speaker what to do. [`format`] holds the
//! building blocks, [`templates`] assembles them per meeting step.

pub mod format;
mod templates;

pub use format::{
    format_agenda, format_numbered_list, format_questions, format_references, format_rules,
    format_summary_structure,
};
pub use templates::DirectiveTemplate;
