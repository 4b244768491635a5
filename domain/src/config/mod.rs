//! Presentation choices that are part of a user's configuration

mod output_format;

pub use output_format::OutputFormat;
