//! Reference lookup port.
//!
//! Defines the interface for the knowledge lookups a completion backend may
//! call mid-reply (literature search, astronomical object lookup).
//! Infrastructure adapters implement this against the real services.

use async_trait::async_trait;
use lab_domain::LookupRequest;
use thiserror::Error;

/// Errors that can occur during a lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The service needs a credential that was not configured
    #[error("Not available: {0}")]
    NotAvailable(String),
    /// The service could not be reached or answered with an error
    #[error("Service failed: {0}")]
    ServiceFailed(String),
}

/// Port for resolving a lookup request to text the model can read.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError>;
}

/// Lookup used when no services are wired in
pub struct NoLookup;

#[async_trait]
impl ReferenceLookup for NoLookup {
    async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError> {
        Err(LookupError::NotAvailable(format!(
            "no lookup service configured for {:?}",
            request
        )))
    }
}
