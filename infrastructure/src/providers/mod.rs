//! Completion backends
//!
//! [`OpenAiCompatibleGateway`] talks to one provider; [`RoutingGateway`]
//! picks the provider for each request from its model id.

pub mod openai;
pub mod routing;

pub use openai::OpenAiCompatibleGateway;
pub use routing::RoutingGateway;
