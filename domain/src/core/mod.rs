//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: completion models and their providers
//! - [`sampling::SamplingParams`]: temperature, model and tool switch for a meeting
//! - [`usage::TokenUsage`]: token accounting and pricing
//! - [`error::DomainError`]: configuration errors

pub mod error;
pub mod model;
pub mod sampling;
pub mod usage;
