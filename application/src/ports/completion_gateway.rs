//! Completion Gateway port
//!
//! Defines the interface for turning a persona's instructions and the
//! conversation so far into a single generated reply.

use async_trait::async_trait;
use lab_domain::{HistoryEntry, Model, Provider, TokenUsage};
use thiserror::Error;

/// Errors that can occur during completion gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing API key for provider '{provider}' (set it in [api_keys] or via {env_var})")]
    MissingCredential {
        provider: Provider,
        env_var: &'static str,
    },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the error is a configuration problem detected before any call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingCredential { .. } | GatewayError::ModelNotAvailable(_)
        )
    }
}

/// Everything the backend needs to produce one reply
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Persona instructions, sent as the system message
    pub system_instructions: String,
    /// Collapsed two-role history, oldest first
    pub history: Vec<HistoryEntry>,
    pub temperature: f32,
    pub model: Model,
    /// Offer the lookup tools if the model supports them
    pub tools_enabled: bool,
}

/// A generated reply
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Tokens consumed, when the backend reports them
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Gateway for text generation
///
/// This port defines how the application layer talks to completion backends.
/// Implementations (adapters) live in the infrastructure layer. Calls are
/// fail-fast: the use case never retries.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Generate one reply
    async fn generate(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;

    /// Check that `model` can be served (credentials, routing) without calling it.
    ///
    /// Called once before a meeting starts so configuration problems surface
    /// before the first turn.
    fn preflight(&self, _model: &Model) -> Result<(), GatewayError> {
        Ok(())
    }
}
