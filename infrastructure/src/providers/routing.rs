use super::openai::OpenAiCompatibleGateway;
use crate::config::FileConfig;
use async_trait::async_trait;
use lab_application::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use lab_application::ports::reference_lookup::ReferenceLookup;
use lab_domain::{Model, Provider};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Dispatches each request to the gateway serving the model's provider
pub struct RoutingGateway {
    providers: HashMap<Provider, Arc<dyn CompletionGateway>>,
}

impl RoutingGateway {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, provider: Provider, gateway: Arc<dyn CompletionGateway>) -> Self {
        self.providers.insert(provider, gateway);
        self
    }

    /// OpenAI and DeepSeek gateways sharing one HTTP client and lookup.
    ///
    /// Gateways are registered even without a credential so the missing key
    /// is reported by [`CompletionGateway::preflight`] for the model actually
    /// chosen.
    pub fn from_config(
        client: reqwest::Client,
        config: &FileConfig,
        lookup: Arc<dyn ReferenceLookup>,
    ) -> Self {
        [Provider::OpenAi, Provider::DeepSeek]
            .into_iter()
            .fold(Self::new(), |routing, provider| {
                let gateway = OpenAiCompatibleGateway::new(
                    client.clone(),
                    provider,
                    config.providers.base_url(provider),
                    config.api_keys.for_provider(provider).map(str::to_string),
                    lookup.clone(),
                    config.tool_turn_limit(),
                );
                routing.with_provider(provider, Arc::new(gateway))
            })
    }

    fn resolve_provider(&self, model: &Model) -> Result<&dyn CompletionGateway, GatewayError> {
        let provider = model.provider();
        self.providers
            .get(&provider)
            .map(|g| g.as_ref())
            .ok_or_else(|| {
                GatewayError::ModelNotAvailable(format!(
                    "no gateway configured for provider '{}' (model {})",
                    provider, model
                ))
            })
    }
}

impl Default for RoutingGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for RoutingGateway {
    async fn generate(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        debug!(model = %request.model, provider = %request.model.provider(), "Routing request");
        self.resolve_provider(&request.model)?
            .generate(request)
            .await
    }

    fn preflight(&self, model: &Model) -> Result<(), GatewayError> {
        self.resolve_provider(model)?.preflight(model)
    }
}
